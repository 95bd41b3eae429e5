use super::Erp1TelegramRepr;
use crate::{
    DeviceId, EepId, Error, FourBsTeachInFields, Result, Rorg, FOUR_BS_USER_DATA_LEN,
};

/// A high-level representation of a 4BS learn telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FourBsTeachInRepr {
    /// The profile and manufacturer id, when the telegram carries them.
    pub eep: Option<(EepId, u16)>,
}

impl FourBsTeachInRepr {
    /// Returns `true` when the telegram is a 4BS telegram with the LRN bit
    /// cleared.
    pub fn is_teach_in(telegram: &Erp1TelegramRepr) -> bool {
        telegram.rorg == Rorg::FourBs
            && telegram.user_data.len() == FOUR_BS_USER_DATA_LEN
            && !FourBsTeachInFields::new_unchecked(&telegram.user_data[..]).data_telegram()
    }

    /// Parse a 4BS learn telegram.
    pub fn parse(telegram: &Erp1TelegramRepr) -> Result<Self> {
        if telegram.rorg != Rorg::FourBs {
            return Err(Error::WrongTelegramType);
        }

        if telegram.user_data.len() != FOUR_BS_USER_DATA_LEN {
            return Err(Error::WrongUserDataSize);
        }

        let fields = FourBsTeachInFields::new_unchecked(&telegram.user_data[..]);
        if !fields.with_eep() {
            return Ok(Self { eep: None });
        }

        let eep_type = fields.eep_type_msb() << 5 | fields.eep_type_lsb();
        let manufacturer_id =
            (fields.manufacturer_id_msb() as u16) << 8 | fields.manufacturer_id_lsb() as u16;
        let eep = EepId::new(telegram.rorg.into(), fields.eep_func(), eep_type)?;

        Ok(Self {
            eep: Some((eep, manufacturer_id)),
        })
    }

    /// Build a learn telegram, as a 4BS device sends it.
    pub fn to_telegram(&self, sender: DeviceId) -> Erp1TelegramRepr {
        let mut user_data = [0u8; FOUR_BS_USER_DATA_LEN];
        let mut fields = FourBsTeachInFields::new_unchecked(&mut user_data[..]);

        if let Some((eep, manufacturer_id)) = self.eep {
            fields.set_with_eep(true);
            fields.set_eep_func(eep.func());
            fields.set_eep_type_msb(eep.eep_type() >> 5);
            fields.set_eep_type_lsb(eep.eep_type());
            fields.set_manufacturer_id_msb((manufacturer_id >> 8) as u8);
            fields.set_manufacturer_id_lsb(manufacturer_id as u8);
        }
        fields.set_data_telegram(false);

        Erp1TelegramRepr {
            rorg: Rorg::FourBs,
            user_data: user_data.into_iter().collect(),
            sender,
            ..Default::default()
        }
    }
}
