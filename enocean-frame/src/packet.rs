//! Zero-copy reader/writer for ESP3 packets.
//!
//! ```notrust
//! +------+-------------+---------------+------+------------+------+---------------+-----------+
//! | 0x55 | data length | optional len. | type | header CRC | data | optional data | data CRC  |
//! +------+-------------+---------------+------+------------+------+---------------+-----------+
//!   1      2 (BE)        1               1      1            n      m               1
//! ```
use crate::{crc8, crc8_chained};
use crate::{Error, Result};

/// The first byte of every ESP3 packet.
pub const SYNC_BYTE: u8 = 0x55;
/// Length of the header covered by the header checksum.
pub const HEADER_LEN: usize = 4;
/// Bytes of a packet that are not data or optional data.
pub const PACKET_OVERHEAD: usize = 1 + HEADER_LEN + 2;
/// Shortest buffer accepted by [`Esp3Packet::new`].
pub const MIN_PACKET_LEN: usize = 8;

mod field {
    use core::ops::Range;

    pub const SYNC: usize = 0;
    pub const HEADER: Range<usize> = 1..5;
    pub const DATA_LEN: Range<usize> = 1..3;
    pub const OPTIONAL_LEN: usize = 3;
    pub const PACKET_TYPE: usize = 4;
    pub const HEADER_CRC: usize = 5;
    pub const DATA: usize = 6;
}

/// Returns the buffer length needed for a packet with the given data lengths.
pub const fn buffer_len(data_len: usize, optional_len: usize) -> usize {
    PACKET_OVERHEAD + data_len + optional_len
}

/// A reader/writer for an ESP3 packet.
#[derive(Debug, Clone, Copy)]
pub struct Esp3Packet<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> Esp3Packet<T> {
    /// Create a new [`Esp3Packet`] reader/writer from a given buffer.
    ///
    /// Bytes beyond the length implied by the header are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in order: [`Error::Framing`],
    /// [`Error::Sync`], [`Error::HeaderChecksum`], [`Error::Length`] and
    /// [`Error::BodyChecksum`].
    pub fn new(buffer: T) -> Result<Self> {
        let packet = Self::new_unchecked(buffer);
        packet.check()?;
        Ok(packet)
    }

    /// Check that the buffer holds a complete packet with valid checksums.
    pub fn check(&self) -> Result<()> {
        let b = self.buffer.as_ref();

        if b.len() < MIN_PACKET_LEN {
            return Err(Error::Framing);
        }

        if b[field::SYNC] != SYNC_BYTE {
            return Err(Error::Sync);
        }

        if self.calculate_header_crc() != self.header_crc() {
            return Err(Error::HeaderChecksum);
        }

        if b.len() < self.total_len() {
            return Err(Error::Length);
        }

        if self.calculate_data_crc() != self.data_crc() {
            return Err(Error::BodyChecksum);
        }

        Ok(())
    }

    /// Create a new [`Esp3Packet`] reader/writer without checking the buffer.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return the length of the data field.
    pub fn data_len(&self) -> u16 {
        let b = &self.buffer.as_ref()[field::DATA_LEN];
        u16::from_be_bytes([b[0], b[1]])
    }

    /// Return the length of the optional data field.
    pub fn optional_len(&self) -> u8 {
        self.buffer.as_ref()[field::OPTIONAL_LEN]
    }

    /// Return the packet type.
    pub fn packet_type(&self) -> PacketType {
        PacketType::from(self.buffer.as_ref()[field::PACKET_TYPE])
    }

    /// Return the header checksum field.
    pub fn header_crc(&self) -> u8 {
        self.buffer.as_ref()[field::HEADER_CRC]
    }

    /// Calculate the checksum over the header.
    pub fn calculate_header_crc(&self) -> u8 {
        crc8(&self.buffer.as_ref()[field::HEADER])
    }

    /// Return the total length of the packet, as implied by the header.
    pub fn total_len(&self) -> usize {
        buffer_len(self.data_len() as usize, self.optional_len() as usize)
    }

    /// Return the data field.
    pub fn data(&self) -> &[u8] {
        let start = field::DATA;
        &self.buffer.as_ref()[start..start + self.data_len() as usize]
    }

    /// Return the optional data field.
    pub fn optional_data(&self) -> &[u8] {
        let start = field::DATA + self.data_len() as usize;
        &self.buffer.as_ref()[start..start + self.optional_len() as usize]
    }

    /// Return the checksum over data and optional data.
    pub fn data_crc(&self) -> u8 {
        self.buffer.as_ref()[self.total_len() - 1]
    }

    /// Calculate the checksum over data and optional data.
    pub fn calculate_data_crc(&self) -> u8 {
        crc8_chained(self.data(), self.optional_data())
    }

    /// Consume the reader and return the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<'p> Esp3Packet<&'p [u8]> {
    /// Return the data and optional data fields, borrowed from the buffer.
    pub fn payload(&self) -> (&'p [u8], &'p [u8]) {
        let buffer = self.buffer;
        let data_end = field::DATA + self.data_len() as usize;
        let optional_end = data_end + self.optional_len() as usize;
        (
            &buffer[field::DATA..data_end],
            &buffer[data_end..optional_end],
        )
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Esp3Packet<T> {
    /// Write the sync byte.
    pub fn set_sync_byte(&mut self) {
        self.buffer.as_mut()[field::SYNC] = SYNC_BYTE;
    }

    /// Set the length of the data field.
    pub fn set_data_len(&mut self, len: u16) {
        self.buffer.as_mut()[field::DATA_LEN].copy_from_slice(&len.to_be_bytes());
    }

    /// Set the length of the optional data field.
    pub fn set_optional_len(&mut self, len: u8) {
        self.buffer.as_mut()[field::OPTIONAL_LEN] = len;
    }

    /// Set the packet type.
    pub fn set_packet_type(&mut self, packet_type: PacketType) {
        self.buffer.as_mut()[field::PACKET_TYPE] = packet_type.into();
    }

    /// Calculate and write the header checksum.
    pub fn fill_header_crc(&mut self) {
        let crc = self.calculate_header_crc();
        self.buffer.as_mut()[field::HEADER_CRC] = crc;
    }

    /// Return a mutable reference to the data field.
    pub fn data_mut(&mut self) -> &mut [u8] {
        let start = field::DATA;
        let end = start + self.data_len() as usize;
        &mut self.buffer.as_mut()[start..end]
    }

    /// Return a mutable reference to the optional data field.
    pub fn optional_data_mut(&mut self) -> &mut [u8] {
        let start = field::DATA + self.data_len() as usize;
        let end = start + self.optional_len() as usize;
        &mut self.buffer.as_mut()[start..end]
    }

    /// Calculate and write the checksum over data and optional data.
    pub fn fill_data_crc(&mut self) {
        let crc = self.calculate_data_crc();
        let end = self.total_len() - 1;
        self.buffer.as_mut()[end] = crc;
    }
}

/// ESP3 packet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum PacketType {
    /// ERP1 radio telegram.
    RadioErp1,
    /// Response to a command.
    Response,
    /// Radio sub telegram.
    RadioSubTel,
    /// Event message.
    Event,
    /// Common command.
    CommonCommand,
    /// Smart acknowledge command.
    SmartAckCommand,
    /// Remote management command.
    RemoteManCommand,
    /// Radio message.
    RadioMessage,
    /// ERP2 radio telegram.
    RadioErp2,
    /// Configuration command.
    ConfigCommand,
    /// Command accepted.
    CommandAccepted,
    /// IEEE 802.15.4 radio telegram.
    Radio802_15_4,
    /// 2.4 GHz command.
    Command2_4,
    /// Any packet type this crate does not know about.
    Unknown(u8),
}

impl From<u8> for PacketType {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::RadioErp1,
            0x02 => Self::Response,
            0x03 => Self::RadioSubTel,
            0x04 => Self::Event,
            0x05 => Self::CommonCommand,
            0x06 => Self::SmartAckCommand,
            0x07 => Self::RemoteManCommand,
            0x09 => Self::RadioMessage,
            0x0a => Self::RadioErp2,
            0x0b => Self::ConfigCommand,
            0x0c => Self::CommandAccepted,
            0x10 => Self::Radio802_15_4,
            0x11 => Self::Command2_4,
            value => Self::Unknown(value),
        }
    }
}

impl From<PacketType> for u8 {
    fn from(value: PacketType) -> Self {
        match value {
            PacketType::RadioErp1 => 0x01,
            PacketType::Response => 0x02,
            PacketType::RadioSubTel => 0x03,
            PacketType::Event => 0x04,
            PacketType::CommonCommand => 0x05,
            PacketType::SmartAckCommand => 0x06,
            PacketType::RemoteManCommand => 0x07,
            PacketType::RadioMessage => 0x09,
            PacketType::RadioErp2 => 0x0a,
            PacketType::ConfigCommand => 0x0b,
            PacketType::CommandAccepted => 0x0c,
            PacketType::Radio802_15_4 => 0x10,
            PacketType::Command2_4 => 0x11,
            PacketType::Unknown(value) => value,
        }
    }
}
