#![no_main]

use enocean_frame::{Erp1TelegramRepr, Esp3Packet, PacketRepr};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|telegram: Erp1TelegramRepr| {
    let mut buffer = vec![0; telegram.buffer_len()];
    telegram.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..]));

    let packet = Esp3Packet::new(&buffer[..]).expect("emitted packet must be valid");
    let parsed = Erp1TelegramRepr::parse(&PacketRepr::parse(&packet))
        .expect("emitted telegram must parse");
    assert_eq!(u8::from(parsed.rorg), u8::from(telegram.rorg));
    assert_eq!(parsed.user_data, telegram.user_data);
    assert_eq!(parsed.sender, telegram.sender);
    assert_eq!(parsed.destination, telegram.destination);
});
