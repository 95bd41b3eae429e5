use super::*;

mod parsing;

#[test]
fn crc8_check_value() {
    assert_eq!(crc8(b"123456789"), 0xf4);
    assert_eq!(crc8(&[]), 0x00);
    assert_eq!(crc8(&[0x00, 0x07, 0x07, 0x01]), 0x7a);
    assert_eq!(crc8_chained(b"1234", b"56789"), crc8(b"123456789"));
}

#[test]
fn emit_read_version_command() {
    let command = CommonCommandRepr::new(CommonCommandCode::ReadVersion);

    let mut buffer = vec![0; command.buffer_len()];
    command.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

    assert_eq!(buffer, [0x55, 0x00, 0x01, 0x00, 0x05, 0x70, 0x03, 0x09]);
}

#[test]
fn emit_write_base_id_command() {
    let command = CommonCommandRepr {
        code: CommonCommandCode::WriteIdBase,
        data: &[0xff, 0x80, 0x00, 0x00],
        optional_data: &[],
    };
    assert!(command.validate().is_ok());

    let mut buffer = vec![0; command.buffer_len()];
    command.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

    assert_eq!(
        buffer,
        [0x55, 0x00, 0x05, 0x00, 0x05, 0xdb, 0x07, 0xff, 0x80, 0x00, 0x00, 0xf3]
    );
}

#[test]
fn emit_ok_response() {
    let response = ResponseRepr::new(ReturnCode::Ok);

    let mut buffer = vec![0; response.buffer_len()];
    response.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

    assert_eq!(buffer, [0x55, 0x00, 0x01, 0x00, 0x02, 0x65, 0x00, 0x00]);
}

#[test]
fn emit_ute_query() {
    let query = UteRepr {
        kind: UteKind::Query(UteQueryRequestType::TeachIn),
        bidirectional: true,
        response_expected: true,
        channels: 1,
        manufacturer_id: 0x046,
        eep: EepId::new(0xd2, 0x01, 0x12).unwrap(),
    };

    let mut telegram = query.to_telegram(DeviceId::from_u32(0x01a2_b3ff), DeviceId::BROADCAST);
    telegram.sub_tel_num = 1;
    telegram.dbm = 0x2d;

    let mut buffer = vec![0; telegram.buffer_len()];
    telegram.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

    assert_eq!(
        buffer,
        [
            0x55, 0x00, 0x0d, 0x07, 0x01, 0xfd, 0xd4, 0x80, 0x01, 0x46, 0x00, 0x12, 0x01, 0xd2,
            0x01, 0xa2, 0xb3, 0xff, 0x00, 0x01, 0xff, 0xff, 0xff, 0xff, 0x2d, 0x00, 0x56,
        ]
    );
}

#[test]
fn packet_repr_round_trip() {
    let data = [0xaa; 300];
    let optional_data = [0x55; 255];

    for (packet_type, data, optional_data) in [
        (PacketType::RadioErp1, &data[..6], &optional_data[..7]),
        (PacketType::Response, &data[..1], &optional_data[..0]),
        (PacketType::Event, &data[..], &optional_data[..]),
        (PacketType::Unknown(0x42), &data[..1], &optional_data[..3]),
    ] {
        let repr = PacketRepr {
            packet_type,
            data,
            optional_data,
        };
        assert!(repr.validate().is_ok());

        let mut buffer = vec![0; repr.buffer_len()];
        repr.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

        let packet = Esp3Packet::new(&buffer[..]).unwrap();
        assert_eq!(PacketRepr::parse(&packet), repr);
    }
}

#[test]
fn empty_packet_is_too_short() {
    let repr = PacketRepr {
        packet_type: PacketType::Unknown(0x42),
        data: &[],
        optional_data: &[],
    };
    assert!(repr.validate().is_ok());
    assert_eq!(repr.buffer_len(), MIN_PACKET_LEN - 1);

    let mut buffer = vec![0; repr.buffer_len()];
    repr.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

    assert_eq!(Esp3Packet::new(&buffer[..]).err(), Some(Error::Framing));
}

fn parse_packet(bytes: &[u8]) -> Result<PacketRepr<'_>> {
    let packet = Esp3Packet::new(bytes)?;
    Ok(PacketRepr::parse(&packet))
}

#[test]
fn packet_repr_outlives_reader() {
    let bytes = [0x55, 0x00, 0x01, 0x01, 0x05, 0x65, 0x08, 0x0a, 0x9e];

    let repr = parse_packet(&bytes).unwrap();
    assert_eq!(repr.packet_type, PacketType::CommonCommand);
    assert_eq!(repr.data, &[0x08]);
    assert_eq!(repr.optional_data, &[0x0a]);
}

#[test]
fn packet_repr_validate_rejects_oversized_fields() {
    let data = vec![0u8; u16::MAX as usize + 1];
    let repr = PacketRepr {
        packet_type: PacketType::RadioErp1,
        data: &data,
        optional_data: &[],
    };
    assert_eq!(repr.validate(), Err(Error::Length));

    let optional_data = [0u8; 256];
    let repr = PacketRepr {
        packet_type: PacketType::RadioErp1,
        data: &[],
        optional_data: &optional_data,
    };
    assert_eq!(repr.validate(), Err(Error::Length));
}

#[test]
fn single_bit_flips_are_detected() {
    let mut telegram = Erp1TelegramRepr::new(Rorg::Vld, &[0x01, 0x02, 0x03, 0x04]).unwrap();
    telegram.sender = DeviceId::from_u32(0x0505_0505);

    let mut buffer = vec![0; telegram.buffer_len()];
    telegram.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));
    assert!(Esp3Packet::new(&buffer[..]).is_ok());

    let body = 6..buffer.len() - 1;
    for byte in body {
        for bit in 0..8 {
            let mut corrupted = buffer.clone();
            corrupted[byte] ^= 1 << bit;
            assert_eq!(
                Esp3Packet::new(&corrupted[..]).err(),
                Some(Error::BodyChecksum),
                "flipping bit {bit} of byte {byte} went unnoticed"
            );
        }
    }
}

#[test]
fn telegram_round_trip() {
    let mut telegram = Erp1TelegramRepr::new(Rorg::FourBs, &[0x10, 0x20, 0x30, 0x48]).unwrap();
    telegram.sender = DeviceId::from_u32(0x0180_1234);
    telegram.destination = DeviceId::from_u32(0xff80_0001);
    telegram.status = 0x0f;
    telegram.sub_tel_num = 2;
    telegram.dbm = 0x4a;
    telegram.security_level = 1;

    let mut buffer = vec![0; telegram.buffer_len()];
    telegram.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

    let packet = Esp3Packet::new(&buffer[..]).unwrap();
    let parsed = Erp1TelegramRepr::parse(&PacketRepr::parse(&packet)).unwrap();
    assert_eq!(parsed, telegram);
    assert!(parsed.is_addressed());
    assert_eq!(parsed.status_flags().repeater_count(), 0x0f);
}

#[test]
fn telegram_defaults() {
    let telegram = Erp1TelegramRepr::default();
    assert_eq!(telegram.sender, DeviceId::GATEWAY_SELECTS_SENDER);
    assert_eq!(telegram.destination, DeviceId::BROADCAST);
    assert_eq!(telegram.status, 0);
    assert_eq!(telegram.sub_tel_num, 3);
    assert_eq!(telegram.dbm, 0xff);
    assert_eq!(telegram.security_level, 0);
    assert!(!telegram.is_addressed());
}

#[test]
fn user_data_addressing() {
    let mut telegram = Erp1TelegramRepr::new(Rorg::FourBs, &[0x03, 0x02, 0x01, 0x00]).unwrap();

    for i in 0..4 {
        assert_eq!(telegram.db(i), Ok(i as u8));
    }
    assert_eq!(telegram.db(4), Err(Error::ByteIndexOutOfRange));

    telegram.set_db(3, 0xaa).unwrap();
    assert_eq!(telegram.user_data[0], 0xaa);
    assert_eq!(telegram.set_db(4, 0xaa), Err(Error::ByteIndexOutOfRange));

    let empty = Erp1TelegramRepr::new(Rorg::Rps, &[]).unwrap();
    assert_eq!(empty.db(0), Err(Error::ByteIndexOutOfRange));
}

#[test]
fn user_data_limit() {
    assert!(Erp1TelegramRepr::new(Rorg::Vld, &[0; MAX_USER_DATA_LEN]).is_ok());
    assert_eq!(
        Erp1TelegramRepr::new(Rorg::Vld, &[0; MAX_USER_DATA_LEN + 1]),
        Err(Error::UserDataTooLong)
    );
}

#[test]
fn ute_round_trip() {
    let eeps = [
        EepId::new(0xd2, 0x01, 0x12).unwrap(),
        EepId::new(0xff, 0x3f, 0x7f).unwrap(),
        EepId::new(0x00, 0x00, 0x00).unwrap(),
    ];
    let kinds = [
        UteKind::Query(UteQueryRequestType::TeachIn),
        UteKind::Query(UteQueryRequestType::TeachInDeletion),
        UteKind::Query(UteQueryRequestType::TeachInOrDeletion),
        UteKind::Query(UteQueryRequestType::NotUsed),
        UteKind::Response(UteResponseRequestType::NotAccepted),
        UteKind::Response(UteResponseRequestType::AcceptedTeachIn),
        UteKind::Response(UteResponseRequestType::AcceptedDeletion),
        UteKind::Response(UteResponseRequestType::NotAcceptedEepNotSupported),
    ];

    for eep in eeps {
        for kind in kinds {
            for (bidirectional, response_expected) in [(false, false), (true, false), (false, true)]
            {
                for (channels, manufacturer_id) in [(0, 0), (0xff, 0x7ff), (3, 0x100)] {
                    let ute = UteRepr {
                        kind,
                        bidirectional,
                        response_expected,
                        channels,
                        manufacturer_id,
                        eep,
                    };
                    let telegram =
                        ute.to_telegram(DeviceId::from_u32(1), DeviceId::from_u32(2));
                    assert_eq!(telegram.rorg, Rorg::Ute);
                    assert_eq!(UteRepr::parse(&telegram), Ok(ute));
                }
            }
        }
    }
}

#[test]
fn ute_manufacturer_id_uses_three_bits_of_db3() {
    // Upper DB_3 bits are reserved and do not contribute to the manufacturer id.
    let mut telegram = UteRepr {
        kind: UteKind::Query(UteQueryRequestType::TeachIn),
        bidirectional: false,
        response_expected: true,
        channels: 1,
        manufacturer_id: 0x5a5,
        eep: EepId::new(0xa5, 0x02, 0x05).unwrap(),
    }
    .to_telegram(DeviceId::from_u32(1), DeviceId::BROADCAST);

    assert_eq!(telegram.db(3), Ok(0x05));
    assert_eq!(telegram.db(4), Ok(0xa5));

    telegram.set_db(3, 0xf8 | 0x05).unwrap();
    assert_eq!(UteRepr::parse(&telegram).unwrap().manufacturer_id, 0x5a5);

    let too_wide = UteRepr {
        manufacturer_id: 0xfff,
        ..UteRepr::parse(&telegram).unwrap()
    };
    assert_eq!(
        UteRepr::parse(&too_wide.to_telegram(DeviceId::from_u32(1), DeviceId::BROADCAST))
            .unwrap()
            .manufacturer_id,
        UteRepr::MAX_MANUFACTURER_ID
    );
}

#[test]
fn ute_errors() {
    let telegram = Erp1TelegramRepr::new(Rorg::Vld, &[0; 7]).unwrap();
    assert_eq!(UteRepr::parse(&telegram), Err(Error::WrongTelegramType));

    let telegram = Erp1TelegramRepr::new(Rorg::Ute, &[0; 6]).unwrap();
    assert_eq!(UteRepr::parse(&telegram), Err(Error::WrongUserDataSize));

    // DB_1 holds the function, which only has 6 bits.
    let telegram =
        Erp1TelegramRepr::new(Rorg::Ute, &[0x00, 0x01, 0x00, 0x00, 0x00, 0x40, 0xd2]).unwrap();
    assert_eq!(UteRepr::parse(&telegram), Err(Error::EepFieldOutOfRange));
}

#[test]
fn ute_response_echoes_query() {
    let query = UteRepr {
        kind: UteKind::Query(UteQueryRequestType::TeachIn),
        bidirectional: true,
        response_expected: true,
        channels: 0xff,
        manufacturer_id: 0x00d,
        eep: EepId::new(0xd2, 0x01, 0x12).unwrap(),
    };

    let response = query.response(UteResponseRequestType::AcceptedTeachIn);
    assert!(!response.is_query());
    assert!(!response.response_expected);
    assert_eq!(response.eep, query.eep);
    assert_eq!(response.channels, query.channels);
    assert_eq!(response.manufacturer_id, query.manufacturer_id);

    let telegram = response.to_telegram(DeviceId::from_u32(0xff80_0000), DeviceId::from_u32(7));
    assert_eq!(telegram.db(6), Ok(0b1100_0001 | (1 << 4)));
}

#[test]
fn four_bs_teach_in_round_trip() {
    let eep = EepId::new(0xa5, 0x3f, 0x7f).unwrap();
    let learn = FourBsTeachInRepr {
        eep: Some((eep, 0x7ff)),
    };

    let telegram = learn.to_telegram(DeviceId::from_u32(0x0180_1234));
    assert!(FourBsTeachInRepr::is_teach_in(&telegram));
    assert_eq!(FourBsTeachInRepr::parse(&telegram), Ok(learn));

    let bare = FourBsTeachInRepr { eep: None };
    let telegram = bare.to_telegram(DeviceId::from_u32(0x0180_1234));
    assert!(FourBsTeachInRepr::is_teach_in(&telegram));
    assert_eq!(FourBsTeachInRepr::parse(&telegram), Ok(bare));
}

#[test]
fn four_bs_data_telegram_is_not_teach_in() {
    let telegram = Erp1TelegramRepr::new(Rorg::FourBs, &[0x00, 0x00, 0x7d, 0x08]).unwrap();
    assert!(!FourBsTeachInRepr::is_teach_in(&telegram));

    let telegram = Erp1TelegramRepr::new(Rorg::OneBs, &[0x00]).unwrap();
    assert!(!FourBsTeachInRepr::is_teach_in(&telegram));
    assert_eq!(
        FourBsTeachInRepr::parse(&telegram),
        Err(Error::WrongTelegramType)
    );
}
