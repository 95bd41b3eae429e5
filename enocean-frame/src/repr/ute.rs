use super::Erp1TelegramRepr;
use crate::{
    DeviceId, EepId, Error, Result, Rorg, UteFields, UteQueryRequestType,
    UteResponseRequestType, UTE_COMMAND_QUERY, UTE_COMMAND_RESPONSE, UTE_USER_DATA_LEN,
};

/// Direction of a UTE telegram, with its request type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum UteKind {
    /// A teach-in query, sent by the device.
    Query(UteQueryRequestType),
    /// A teach-in response, sent by the gateway.
    Response(UteResponseRequestType),
}

/// A high-level representation of a Universal Teach-In telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct UteRepr {
    /// Query or response, with the request type.
    pub kind: UteKind,
    /// Bidirectional communication.
    pub bidirectional: bool,
    /// The sender of the telegram expects a response.
    pub response_expected: bool,
    /// Number of channels to be taught in.
    pub channels: u8,
    /// Manufacturer id, 11 bits.
    pub manufacturer_id: u16,
    /// The profile of the device.
    pub eep: EepId,
}

impl UteRepr {
    /// Highest manufacturer id that fits a UTE telegram.
    pub const MAX_MANUFACTURER_ID: u16 = 0x07ff;

    /// Parse a UTE telegram.
    pub fn parse(telegram: &Erp1TelegramRepr) -> Result<Self> {
        if telegram.rorg != Rorg::Ute {
            return Err(Error::WrongTelegramType);
        }

        if telegram.user_data.len() != UTE_USER_DATA_LEN {
            return Err(Error::WrongUserDataSize);
        }

        let fields = UteFields::new_unchecked(&telegram.user_data[..]);

        let kind = if fields.command() == UTE_COMMAND_QUERY {
            UteKind::Query(fields.request_type().into())
        } else {
            UteKind::Response(fields.request_type().into())
        };

        Ok(Self {
            kind,
            bidirectional: fields.bidirectional(),
            response_expected: !fields.response_not_expected(),
            channels: fields.channels(),
            manufacturer_id: (fields.manufacturer_id_msb() as u16) << 8
                | fields.manufacturer_id_lsb() as u16,
            eep: EepId::new(fields.eep_rorg(), fields.eep_func(), fields.eep_type())?,
        })
    }

    /// Build the telegram carrying this message.
    ///
    /// Manufacturer id bits above [`Self::MAX_MANUFACTURER_ID`] are dropped.
    pub fn to_telegram(&self, sender: DeviceId, destination: DeviceId) -> Erp1TelegramRepr {
        let mut user_data = [0u8; UTE_USER_DATA_LEN];
        let mut fields = UteFields::new_unchecked(&mut user_data[..]);

        match self.kind {
            UteKind::Query(request_type) => {
                fields.set_command(UTE_COMMAND_QUERY);
                fields.set_request_type(request_type.into());
            }
            UteKind::Response(request_type) => {
                fields.set_command(UTE_COMMAND_RESPONSE);
                fields.set_request_type(request_type.into());
            }
        }
        fields.set_bidirectional(self.bidirectional);
        fields.set_response_not_expected(!self.response_expected);
        fields.set_channels(self.channels);
        fields.set_manufacturer_id_lsb(self.manufacturer_id as u8);
        fields.set_manufacturer_id_msb((self.manufacturer_id >> 8) as u8);
        fields.set_eep_type(self.eep.eep_type());
        fields.set_eep_func(self.eep.func());
        fields.set_eep_rorg(self.eep.rorg());

        Erp1TelegramRepr {
            rorg: Rorg::Ute,
            user_data: user_data.into_iter().collect(),
            sender,
            destination,
            ..Default::default()
        }
    }

    /// Build the response to this query. The device, channels and
    /// manufacturer are echoed back.
    pub fn response(&self, request_type: UteResponseRequestType) -> Self {
        Self {
            kind: UteKind::Response(request_type),
            response_expected: false,
            ..*self
        }
    }

    /// Returns `true` for a teach-in query.
    pub fn is_query(&self) -> bool {
        matches!(self.kind, UteKind::Query(_))
    }
}
