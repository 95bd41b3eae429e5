use crate::*;

fn parse_response(bytes: &[u8]) -> ResponseRepr {
    let packet = Esp3Packet::new(bytes).unwrap();
    ResponseRepr::parse(&PacketRepr::parse(&packet)).unwrap()
}

#[test]
fn parse_ok_response() {
    let response = parse_response(&[0x55, 0x00, 0x01, 0x00, 0x02, 0x65, 0x00, 0x00]);

    assert_eq!(response.return_code, ReturnCode::Ok);
    assert!(response.data.is_empty());
    assert!(response.optional_data.is_empty());
    assert!(response.check_ok().is_ok());
}

#[test]
fn parse_version_response() {
    let response = parse_response(&[
        0x55, 0x00, 0x21, 0x00, 0x02, 0x26, 0x00, 0x02, 0x01, 0x04, 0x05, 0x02, 0x05, 0x01,
        0x00, 0x01, 0x82, 0x34, 0x56, 0x45, 0x4f, 0x03, 0x01, 0x47, 0x41, 0x54, 0x45, 0x57,
        0x41, 0x59, 0x43, 0x54, 0x52, 0x4c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x91,
    ]);

    let version = VersionRepr::parse(&response).unwrap();
    assert_eq!(
        version.app_version,
        VersionIdentifier {
            main: 2,
            beta: 1,
            alpha: 4,
            build: 5
        }
    );
    assert_eq!(version.api_version.main, 2);
    assert_eq!(version.chip_id, DeviceId::from_u32(0x0182_3456));
    assert_eq!(version.chip_version, 0x454f_0301);
    assert_eq!(version.app_description.as_str(), "GATEWAYCTRL");
    assert_eq!(format!("{}", version.app_version), "2.1.4.5");
}

#[test]
fn parse_base_id_response() {
    let response = parse_response(&[
        0x55, 0x00, 0x05, 0x01, 0x02, 0xdb, 0x00, 0xff, 0x80, 0x00, 0x00, 0x0a, 0x3e,
    ]);

    let base_id = BaseIdRepr::parse(&response).unwrap();
    assert_eq!(base_id.base_id, DeviceId::from_u32(0xff80_0000));
    assert_eq!(base_id.remaining_writes, Some(10));
}

#[test]
fn response_errors() {
    let empty = PacketRepr {
        packet_type: PacketType::Response,
        data: &[],
        optional_data: &[],
    };
    assert_eq!(ResponseRepr::parse(&empty), Err(Error::ResponseTooShort));

    let radio = PacketRepr {
        packet_type: PacketType::RadioErp1,
        data: &[0x00],
        optional_data: &[],
    };
    assert_eq!(ResponseRepr::parse(&radio), Err(Error::WrongPacketType));

    let not_supported = ResponseRepr::new(ReturnCode::NotSupported);
    assert_eq!(not_supported.check_ok(), Err(Error::ResponseNotOk));
    assert_eq!(VersionRepr::parse(&not_supported), Err(Error::ResponseNotOk));
    assert_eq!(
        BaseIdRepr::parse(&ResponseRepr::new(ReturnCode::Ok)),
        Err(Error::ResponseTooShort)
    );
}

#[test]
fn return_codes() {
    for code in 0..=u8::MAX {
        assert_eq!(u8::from(ReturnCode::from(code)), code);
    }
    assert_eq!(ReturnCode::from(5), ReturnCode::LockSet);
    assert_eq!(ReturnCode::from(0x80), ReturnCode::Unknown(0x80));
}

#[test]
fn parse_common_command() {
    let bytes = [0x55, 0x00, 0x01, 0x00, 0x05, 0x70, 0x08, 0x38];
    let packet = Esp3Packet::new(&bytes[..]).unwrap();
    let command = CommonCommandRepr::parse(&PacketRepr::parse(&packet)).unwrap();

    assert_eq!(command.code, CommonCommandCode::ReadIdBase);
    assert!(command.data.is_empty());
}
