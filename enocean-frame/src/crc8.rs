//! CRC8 checksum used by the ESP3 header and body.

/// The CRC8 used by ESP3: polynomial x^8 + x^2 + x + 1, no reflection,
/// initial and final values of 0x00.
pub const CRC_8_ESP3: crc::Algorithm<u8> = crc::Algorithm {
    width: 8,
    poly: 0x07,
    init: 0x00,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xf4,
    residue: 0x00,
};

const CRC8: crc::Crc<u8> = crc::Crc::<u8>::new(&CRC_8_ESP3);

/// Calculate the ESP3 CRC8 over `bytes`.
#[inline]
pub fn crc8(bytes: &[u8]) -> u8 {
    CRC8.checksum(bytes)
}

/// Calculate the ESP3 CRC8 over the concatenation of two byte slices.
#[inline]
pub fn crc8_chained(first: &[u8], second: &[u8]) -> u8 {
    let mut digest = CRC8.digest();
    digest.update(first);
    digest.update(second);
    digest.finalize()
}
