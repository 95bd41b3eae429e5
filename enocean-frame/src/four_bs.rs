//! 4BS learn telegram bit layout.
//!
//! ```notrust
//! DB_3: | function (6) | type, bits 5..7 (2) |
//! DB_2: | type, bits 0..5 (5) | manufacturer id, bits 8..11 (3) |
//! DB_1: | manufacturer id, bits 0..8 |
//! DB_0: | learn type | EEP result | learn result | learn status | LRN | reserved (3) |
//! ```
use enocean_macros::fields;

/// Number of user data bytes of a 4BS telegram.
pub const FOUR_BS_USER_DATA_LEN: usize = 4;

#[fields]
#[derive(Debug)]
/// A reader/writer for the user data of a 4BS learn telegram.
pub struct FourBsTeachInFields {
    /// Return the upper 2 bits of the EEP type.
    #[bits(2)]
    eep_type_msb: u8,
    /// Return the EEP function.
    #[bits(6)]
    eep_func: u8,
    /// Return the upper 3 bits of the manufacturer id.
    #[bits(3)]
    manufacturer_id_msb: u8,
    /// Return the lower 5 bits of the EEP type.
    #[bits(5)]
    eep_type_lsb: u8,
    /// Return the lower 8 bits of the manufacturer id.
    manufacturer_id_lsb: u8,
    #[bits(3)]
    _reserved: u8,
    /// Return the LRN bit: `false` for a learn telegram, `true` for data.
    #[bits(1)]
    data_telegram: bool,
    /// Return the learn status bit.
    #[bits(1)]
    learn_status: bool,
    /// Return the learn result bit.
    #[bits(1)]
    learn_result: bool,
    /// Return the EEP result bit.
    #[bits(1)]
    eep_result: bool,
    /// Return `true` when the telegram carries an EEP and manufacturer id.
    #[bits(1)]
    with_eep: bool,
}
