//! Zero-copy read and write structures for EnOcean Serial Protocol 3 (ESP3)
//! packets and the ERP1 radio telegrams they carry.
//!
//! Each reader contains the following functions:
//! - [`new`]: Create a new reader, checking the framing and both checksums.
//! - [`check`]: Check if the buffer contains a valid packet.
//! - [`new_unchecked`]: Create a new reader without any checks.
//!
//! The packet reader gives access to the raw fields of a packet. The
//! representations (`*Repr`) turn those fields into typed values:
//! - [`PacketRepr`]: packet type, data and optional data.
//! - [`Erp1TelegramRepr`]: a radio telegram with addressable user data.
//! - [`UteRepr`]: a Universal Teach-In (UTE) query or response.
//! - [`FourBsTeachInRepr`]: a 4BS learn telegram.
//! - [`ResponseRepr`]: a response of the transceiver module to a command.
//! - [`CommonCommandRepr`]: a command sent to the transceiver module.
//!
//! ## Reading a packet
//! ```
//! # use enocean_frame::{DeviceId, Esp3Packet, PacketRepr, PacketType, Erp1TelegramRepr, Rorg};
//! let bytes: [u8; 21] = [
//!     0x55, 0x00, 0x07, 0x07, 0x01, 0x7a, 0xf6, 0x30, 0x01, 0x02, 0x03, 0x04, 0x30, 0x01,
//!     0xff, 0xff, 0xff, 0xff, 0x2d, 0x00, 0xfc,
//! ];
//! let packet = Esp3Packet::new(&bytes[..]).unwrap();
//! assert_eq!(packet.packet_type(), PacketType::RadioErp1);
//!
//! let telegram = Erp1TelegramRepr::parse(&PacketRepr::parse(&packet)).unwrap();
//! assert_eq!(telegram.rorg, Rorg::Rps);
//! assert_eq!(telegram.sender, DeviceId::from_u32(0x0102_0304));
//! assert_eq!(telegram.db(0), Ok(0x30));
//! ```
//!
//! ## Writing a packet
//! ```
//! # use enocean_frame::{DeviceId, Esp3Packet, Erp1TelegramRepr, Rorg};
//! let mut telegram = Erp1TelegramRepr::new(Rorg::OneBs, &[0x09]).unwrap();
//! telegram.sender = DeviceId::from_u32(0xff80_0001);
//!
//! let mut buffer = [0u8; 64];
//! let len = telegram.buffer_len();
//! telegram.emit(&mut Esp3Packet::new_unchecked(&mut buffer[..len]));
//!
//! assert!(Esp3Packet::new(&buffer[..len]).is_ok());
//! ```
//!
//! [`new`]: Esp3Packet::new
//! [`check`]: Esp3Packet::check
//! [`new_unchecked`]: Esp3Packet::new_unchecked
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(test)]
mod tests;

mod crc8;
pub use crc8::*;

mod packet;
pub use packet::*;

mod device_id;
pub use device_id::*;

mod eep;
pub use eep::*;

mod rorg;
pub use rorg::*;

mod erp1;
pub use erp1::*;

mod ute;
pub use ute::*;

mod four_bs;
pub use four_bs::*;

mod response;
pub use response::*;

mod common_command;
pub use common_command::*;

mod repr;
pub use repr::*;

/// An error that can occur when reading or writing ESP3 packets and the
/// structures they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The buffer is too short to contain a packet.
    Framing,
    /// The first byte is not the sync byte.
    Sync,
    /// The header checksum does not match.
    HeaderChecksum,
    /// The buffer is shorter than the length fields imply, or a field does
    /// not fit its length field.
    Length,
    /// The checksum over data and optional data does not match.
    BodyChecksum,
    /// The packet is not of the expected packet type.
    WrongPacketType,
    /// The optional data does not have the expected size.
    OptionalDataSize,
    /// The data is too short for the expected structure.
    DataTooShort,
    /// The user data does not fit a telegram.
    UserDataTooLong,
    /// A user data byte index is beyond the user data.
    ByteIndexOutOfRange,
    /// The telegram is not of the expected telegram type (RORG).
    WrongTelegramType,
    /// The user data does not have the expected size.
    WrongUserDataSize,
    /// A value does not fit in a 32-bit device identifier.
    DeviceIdOutOfRange,
    /// A field of an equipment profile identifier is out of range.
    EepFieldOutOfRange,
    /// A string is not in the expected format.
    InvalidFormat,
    /// A response does not carry enough data.
    ResponseTooShort,
    /// A response carries more data than can be stored.
    ResponseTooLong,
    /// A response has a return code other than `Ok`.
    ResponseNotOk,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::Framing => "packet is too short",
            Error::Sync => "missing sync byte",
            Error::HeaderChecksum => "header checksum mismatch",
            Error::Length => "length does not match the length fields",
            Error::BodyChecksum => "data checksum mismatch",
            Error::WrongPacketType => "wrong packet type",
            Error::OptionalDataSize => "wrong optional data size",
            Error::DataTooShort => "data is too short",
            Error::UserDataTooLong => "user data is too long",
            Error::ByteIndexOutOfRange => "user data byte index out of range",
            Error::WrongTelegramType => "wrong telegram type",
            Error::WrongUserDataSize => "wrong user data size",
            Error::DeviceIdOutOfRange => "device id out of range",
            Error::EepFieldOutOfRange => "EEP field out of range",
            Error::InvalidFormat => "invalid format",
            Error::ResponseTooShort => "response is too short",
            Error::ResponseTooLong => "response is too long",
            Error::ResponseNotOk => "response return code is not OK",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A type alias for `Result<T, frame::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
