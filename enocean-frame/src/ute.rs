//! Universal Teach-In (UTE) bit layout.
//!
//! The seven user data bytes are stored with DB_6 first. Fields in the
//! generated reader are in buffer order:
//!
//! ```notrust
//! DB_6: | bidirectional | response not expected | request type (2) | command (4) |
//! DB_5: | number of channels |
//! DB_4: | manufacturer id, bits 0..8 |
//! DB_3: | reserved (5) | manufacturer id, bits 8..11 (3) |
//! DB_2: | type |
//! DB_1: | function |
//! DB_0: | RORG |
//! ```
use enocean_macros::fields;

/// Number of user data bytes of a UTE telegram.
pub const UTE_USER_DATA_LEN: usize = 7;

/// Command nibble of a teach-in query.
pub const UTE_COMMAND_QUERY: u8 = 0;
/// Command nibble of a teach-in response.
pub const UTE_COMMAND_RESPONSE: u8 = 1;

#[fields]
#[derive(Debug)]
/// A reader/writer for the user data of a UTE telegram.
pub struct UteFields {
    /// Return the command nibble: 0 for a query, 1 for a response.
    #[bits(4)]
    command: u8,
    /// Return the request type.
    #[bits(2)]
    request_type: u8,
    /// Return `true` when no response is expected.
    #[bits(1)]
    response_not_expected: bool,
    /// Return `true` for bidirectional communication.
    #[bits(1)]
    bidirectional: bool,
    /// Return the number of channels to be taught in.
    channels: u8,
    /// Return the lower 8 bits of the manufacturer id.
    manufacturer_id_lsb: u8,
    /// Return the upper 3 bits of the manufacturer id.
    #[bits(3)]
    manufacturer_id_msb: u8,
    #[bits(5)]
    _reserved: u8,
    /// Return the EEP type.
    eep_type: u8,
    /// Return the EEP function.
    eep_func: u8,
    /// Return the EEP RORG.
    eep_rorg: u8,
}

/// Request type of a teach-in query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum UteQueryRequestType {
    /// Teach-in request.
    TeachIn,
    /// Teach-in deletion request.
    TeachInDeletion,
    /// Teach-in or deletion, not specified.
    TeachInOrDeletion,
    /// Not used.
    NotUsed,
}

impl From<u8> for UteQueryRequestType {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::TeachIn,
            1 => Self::TeachInDeletion,
            2 => Self::TeachInOrDeletion,
            _ => Self::NotUsed,
        }
    }
}

impl From<UteQueryRequestType> for u8 {
    fn from(value: UteQueryRequestType) -> Self {
        match value {
            UteQueryRequestType::TeachIn => 0,
            UteQueryRequestType::TeachInDeletion => 1,
            UteQueryRequestType::TeachInOrDeletion => 2,
            UteQueryRequestType::NotUsed => 3,
        }
    }
}

/// Request type of a teach-in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum UteResponseRequestType {
    /// Request not accepted, general reason.
    NotAccepted,
    /// Teach-in accepted.
    AcceptedTeachIn,
    /// Deletion of the teach-in accepted.
    AcceptedDeletion,
    /// Request not accepted, EEP not supported.
    NotAcceptedEepNotSupported,
}

impl UteResponseRequestType {
    /// Returns `true` for the accepting variants.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::AcceptedTeachIn | Self::AcceptedDeletion)
    }
}

impl From<u8> for UteResponseRequestType {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::NotAccepted,
            1 => Self::AcceptedTeachIn,
            2 => Self::AcceptedDeletion,
            _ => Self::NotAcceptedEepNotSupported,
        }
    }
}

impl From<UteResponseRequestType> for u8 {
    fn from(value: UteResponseRequestType) -> Self {
        match value {
            UteResponseRequestType::NotAccepted => 0,
            UteResponseRequestType::AcceptedTeachIn => 1,
            UteResponseRequestType::AcceptedDeletion => 2,
            UteResponseRequestType::NotAcceptedEepNotSupported => 3,
        }
    }
}
