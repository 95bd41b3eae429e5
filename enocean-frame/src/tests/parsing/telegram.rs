use crate::*;

#[test]
fn parse_ute_query() {
    let bytes = hex::decode("55000d0701fdd4800146001201d201a2b3ff0001ffffffff2d0056").unwrap();

    let packet = Esp3Packet::new(&bytes[..]).unwrap();
    let telegram = Erp1TelegramRepr::parse(&PacketRepr::parse(&packet)).unwrap();

    assert_eq!(telegram.rorg, Rorg::Ute);
    assert_eq!(telegram.user_data_len(), 7);
    assert_eq!(telegram.sender, "01:A2:B3:FF".parse::<DeviceId>().unwrap());
    assert_eq!(telegram.destination, DeviceId::BROADCAST);
    assert_eq!(telegram.sub_tel_num, 1);
    assert_eq!(telegram.dbm, 0x2d);

    let ute = UteRepr::parse(&telegram).unwrap();
    assert_eq!(ute.kind, UteKind::Query(UteQueryRequestType::TeachIn));
    assert!(ute.bidirectional);
    assert!(ute.response_expected);
    assert_eq!(ute.channels, 1);
    assert_eq!(ute.manufacturer_id, 0x046);
    assert_eq!(ute.eep, "D2-01-12".parse::<EepId>().unwrap());
}

#[test]
fn parse_four_bs_teach_in() {
    let bytes = [
        0x55, 0x00, 0x0a, 0x07, 0x01, 0xeb, 0xa5, 0x08, 0x28, 0x0b, 0x80, 0x01, 0x80, 0x12,
        0x34, 0x00, 0x01, 0xff, 0xff, 0xff, 0xff, 0x3a, 0x00, 0x70,
    ];

    let packet = Esp3Packet::new(&bytes[..]).unwrap();
    let telegram = Erp1TelegramRepr::parse(&PacketRepr::parse(&packet)).unwrap();
    assert_eq!(telegram.rorg, Rorg::FourBs);
    assert_eq!(telegram.sender, DeviceId::from_u32(0x0180_1234));
    assert!(FourBsTeachInRepr::is_teach_in(&telegram));

    let learn = FourBsTeachInRepr::parse(&telegram).unwrap();
    assert_eq!(
        learn.eep,
        Some((EepId::new(0xa5, 0x02, 0x05).unwrap(), 0x00b))
    );
}

#[test]
fn parse_four_bs_data() {
    let bytes = [
        0x55, 0x00, 0x0a, 0x07, 0x01, 0xeb, 0xa5, 0x00, 0x00, 0x7d, 0x08, 0x01, 0x80, 0x12,
        0x34, 0x00, 0x01, 0xff, 0xff, 0xff, 0xff, 0x3a, 0x00, 0x6d,
    ];

    let packet = Esp3Packet::new(&bytes[..]).unwrap();
    let telegram = Erp1TelegramRepr::parse(&PacketRepr::parse(&packet)).unwrap();
    assert!(!FourBsTeachInRepr::is_teach_in(&telegram));
    assert_eq!(telegram.db(1), Ok(0x7d));
}

#[test]
fn wrong_packet_type() {
    let packet = PacketRepr {
        packet_type: PacketType::Response,
        data: &[0xf6, 0x00, 0x01, 0x02, 0x03, 0x04, 0x00],
        optional_data: &[0; 7],
    };
    assert_eq!(Erp1TelegramRepr::parse(&packet), Err(Error::WrongPacketType));
}

#[test]
fn wrong_optional_data_size() {
    for len in [0, 6, 8] {
        let optional_data = [0u8; 8];
        let packet = PacketRepr {
            packet_type: PacketType::RadioErp1,
            data: &[0xf6, 0x00, 0x01, 0x02, 0x03, 0x04, 0x00],
            optional_data: &optional_data[..len],
        };
        assert_eq!(
            Erp1TelegramRepr::parse(&packet),
            Err(Error::OptionalDataSize)
        );
    }
}

#[test]
fn data_too_short() {
    let packet = PacketRepr {
        packet_type: PacketType::RadioErp1,
        data: &[0xf6, 0x01, 0x02, 0x03, 0x04],
        optional_data: &[0; 7],
    };
    assert_eq!(Erp1TelegramRepr::parse(&packet), Err(Error::DataTooShort));
}

#[test]
fn user_data_length_follows_data_length() {
    let packet = PacketRepr {
        packet_type: PacketType::RadioErp1,
        data: &[0xd2, 0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x03, 0x04, 0x80],
        optional_data: &[0x03, 0xff, 0x80, 0x00, 0x01, 0x50, 0x00],
    };

    let telegram = Erp1TelegramRepr::parse(&packet).unwrap();
    assert_eq!(&telegram.user_data[..], &[0xaa, 0xbb, 0xcc]);
    assert_eq!(telegram.db(0), Ok(0xcc));
    assert_eq!(telegram.db(2), Ok(0xaa));
    assert_eq!(telegram.sender, DeviceId::from_u32(0x0102_0304));
    assert_eq!(telegram.status, 0x80);
    assert_eq!(telegram.destination, DeviceId::from_u32(0xff80_0001));
    assert_eq!(telegram.dbm, 0x50);
}

#[test]
fn rorg_codes() {
    for code in 0..=u8::MAX {
        assert_eq!(u8::from(Rorg::from(code)), code);
    }
    assert_eq!(Rorg::from(0xf6), Rorg::Rps);
    assert_eq!(Rorg::from(0xd5), Rorg::OneBs);
    assert_eq!(Rorg::from(0xa5), Rorg::FourBs);
    assert_eq!(Rorg::from(0xd2), Rorg::Vld);
    assert_eq!(Rorg::from(0xd4), Rorg::Ute);
    assert!(Rorg::Vld.is_data());
    assert!(!Rorg::Ute.is_data());
}

#[test]
fn status_flags() {
    let flags = StatusFlags::from_status(0x33);
    assert!(flags.contains(StatusFlags::T21));
    assert!(flags.contains(StatusFlags::NU));
    assert_eq!(flags.repeater_count(), 3);
}
