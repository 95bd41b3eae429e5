use crate::*;

const RPS_TELEGRAM: [u8; 20] = [
    0x55, 0x00, 0x06, 0x07, 0x01, 0x11, 0xf6, 0x01, 0x02, 0x03, 0x04, 0x30, 0x01, 0xff, 0xff,
    0xff, 0xff, 0x2d, 0x00, 0x6f,
];

#[test]
fn parse_minimal_radio_packet() {
    let packet = Esp3Packet::new(&RPS_TELEGRAM[..]).unwrap();

    assert_eq!(packet.data_len(), 6);
    assert_eq!(packet.optional_len(), 7);
    assert_eq!(packet.packet_type(), PacketType::RadioErp1);
    assert_eq!(packet.header_crc(), 0x11);
    assert_eq!(packet.data(), &[0xf6, 0x01, 0x02, 0x03, 0x04, 0x30]);
    assert_eq!(
        packet.optional_data(),
        &[0x01, 0xff, 0xff, 0xff, 0xff, 0x2d, 0x00]
    );
    assert_eq!(packet.data_crc(), 0x6f);
    assert_eq!(packet.total_len(), RPS_TELEGRAM.len());
}

#[test]
fn wrong_trailing_crc() {
    let mut bytes = RPS_TELEGRAM;
    let last = bytes.len() - 1;
    bytes[last] = 0x00;

    assert_eq!(Esp3Packet::new(&bytes[..]).err(), Some(Error::BodyChecksum));
}

#[test]
fn too_short() {
    assert_eq!(Esp3Packet::new(&[0u8; 0][..]).err(), Some(Error::Framing));
    assert_eq!(
        Esp3Packet::new(&RPS_TELEGRAM[..7]).err(),
        Some(Error::Framing)
    );
}

#[test]
fn missing_sync_byte() {
    let mut bytes = RPS_TELEGRAM;
    bytes[0] = 0x54;

    assert_eq!(Esp3Packet::new(&bytes[..]).err(), Some(Error::Sync));
}

#[test]
fn wrong_header_crc() {
    let mut bytes = RPS_TELEGRAM;
    bytes[5] ^= 0x01;
    assert_eq!(Esp3Packet::new(&bytes[..]).err(), Some(Error::HeaderChecksum));

    let mut bytes = RPS_TELEGRAM;
    bytes[2] = 0x07;
    assert_eq!(Esp3Packet::new(&bytes[..]).err(), Some(Error::HeaderChecksum));
}

#[test]
fn truncated() {
    for len in 8..RPS_TELEGRAM.len() {
        assert_eq!(
            Esp3Packet::new(&RPS_TELEGRAM[..len]).err(),
            Some(Error::Length),
            "length {len}"
        );
    }
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = std::vec::Vec::from(RPS_TELEGRAM);
    bytes.extend_from_slice(&[0x55, 0x00, 0x01]);

    let packet = Esp3Packet::new(&bytes[..]).unwrap();
    assert_eq!(packet.total_len(), RPS_TELEGRAM.len());
    assert_eq!(packet.data_crc(), 0x6f);
}

#[test]
fn unknown_packet_type() {
    let bytes = hex::decode("5500010042a20000").unwrap();

    let packet = Esp3Packet::new(&bytes[..]).unwrap();
    assert_eq!(packet.packet_type(), PacketType::Unknown(0x42));
    assert_eq!(u8::from(packet.packet_type()), 0x42);
}

#[test]
fn packet_type_codes() {
    for code in 0..=u8::MAX {
        assert_eq!(u8::from(PacketType::from(code)), code);
    }
    assert_eq!(PacketType::from(0x01), PacketType::RadioErp1);
    assert_eq!(PacketType::from(0x02), PacketType::Response);
    assert_eq!(PacketType::from(0x05), PacketType::CommonCommand);
    assert_eq!(PacketType::from(0x0a), PacketType::RadioErp2);
    assert_eq!(PacketType::from(0x11), PacketType::Command2_4);
}
