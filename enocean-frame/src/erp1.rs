//! Layout of ERP1 radio telegrams inside an ESP3 packet.
//!
//! ```notrust
//! data:          | RORG | user data (n) | sender (4) | status |
//! optional data: | sub tel. | destination (4) | dBm | security level |
//! ```
use enocean_macros::fields;

/// Maximum number of user data bytes in an ERP1 telegram.
pub const MAX_USER_DATA_LEN: usize = 14;
/// Shortest ERP1 data field: RORG, sender and status.
pub const ERP1_MIN_DATA_LEN: usize = 6;
/// Length of the ERP1 optional data field.
pub const ERP1_OPTIONAL_DATA_LEN: usize = 7;

#[fields]
#[derive(Debug)]
/// A reader/writer for the sender and status at the end of the ERP1 data.
pub struct Erp1Trailer {
    /// Return the sender address.
    sender: u32,
    /// Return the status byte.
    status: u8,
}

#[fields]
#[derive(Debug)]
/// A reader/writer for the ERP1 optional data.
pub struct Erp1OptionalData {
    /// Return the number of sub telegrams.
    sub_tel_num: u8,
    /// Return the destination address.
    destination: u32,
    /// Return the best received signal strength, as a positive dBm value.
    dbm: u8,
    /// Return the security level.
    security_level: u8,
}

bitflags::bitflags! {
    /// Flags in the ERP1 status byte. The lower nibble holds the repeater
    /// count, see [`StatusFlags::repeater_count`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        /// T21 bit of RPS and 1BS telegrams.
        const T21 = 0b0010_0000;
        /// NU bit of RPS telegrams.
        const NU = 0b0001_0000;
    }
}

impl StatusFlags {
    /// Read the flags from a raw status byte, keeping every bit.
    pub const fn from_status(status: u8) -> Self {
        Self::from_bits_retain(status)
    }

    /// Return how often the telegram was repeated.
    pub const fn repeater_count(&self) -> u8 {
        self.bits() & 0x0f
    }
}
