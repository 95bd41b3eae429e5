#![no_main]

use enocean_frame::{
    Erp1TelegramRepr, Esp3Packet, PacketRepr, ResponseRepr, UteRepr, VersionRepr,
};

use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|data: &[u8]| -> Corpus {
    let Ok(packet) = Esp3Packet::new(data) else {
        return Corpus::Reject;
    };

    let repr = PacketRepr::parse(&packet);
    if let Ok(telegram) = Erp1TelegramRepr::parse(&repr) {
        let _ = UteRepr::parse(&telegram);
        for i in 0..telegram.user_data_len() + 1 {
            let _ = telegram.db(i);
        }
    }
    if let Ok(response) = ResponseRepr::parse(&repr) {
        let _ = VersionRepr::parse(&response);
    }

    Corpus::Keep
});
