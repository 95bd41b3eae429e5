use core::fmt;

use super::{buffer_len, Error, Esp3Packet, PacketType, Result};

mod erp1;
pub use erp1::{Erp1TelegramRepr, UserData};

mod ute;
pub use ute::{UteKind, UteRepr};

mod four_bs;
pub use four_bs::FourBsTeachInRepr;

mod response;
pub use response::{
    BaseIdRepr, ResponseRepr, VersionIdentifier, VersionRepr, MAX_RESPONSE_DATA_LEN,
    MAX_RESPONSE_OPTIONAL_LEN,
};

mod common_command;
pub use common_command::CommonCommandRepr;

/// A high-level representation of an ESP3 packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct PacketRepr<'p> {
    /// The packet type.
    pub packet_type: PacketType,
    /// The data field.
    pub data: &'p [u8],
    /// The optional data field.
    pub optional_data: &'p [u8],
}

impl<'p> PacketRepr<'p> {
    /// Parse a checked ESP3 packet.
    pub fn parse(reader: &Esp3Packet<&'p [u8]>) -> Self {
        let (data, optional_data) = reader.payload();
        Self {
            packet_type: reader.packet_type(),
            data,
            optional_data,
        }
    }

    /// Validate that both fields fit their length fields.
    pub fn validate(&self) -> Result<()> {
        if self.data.len() > u16::MAX as usize || self.optional_data.len() > u8::MAX as usize {
            return Err(Error::Length);
        }

        Ok(())
    }

    /// Return the length of the packet when emitted into a buffer.
    pub fn buffer_len(&self) -> usize {
        buffer_len(self.data.len(), self.optional_data.len())
    }

    /// Emit the packet into a buffer of at least [`Self::buffer_len`] bytes.
    ///
    /// # Panics
    ///
    /// Panics when [`Self::validate`] fails or the buffer is too short.
    pub fn emit(&self, packet: &mut Esp3Packet<&'_ mut [u8]>) {
        packet.set_sync_byte();
        packet.set_data_len(self.data.len() as u16);
        packet.set_optional_len(self.optional_data.len() as u8);
        packet.set_packet_type(self.packet_type);
        packet.fill_header_crc();
        packet.data_mut().copy_from_slice(self.data);
        packet.optional_data_mut().copy_from_slice(self.optional_data);
        packet.fill_data_crc();
    }
}

impl fmt::Display for PacketRepr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ESP3 {:?}:", self.packet_type)?;
        for b in self.data {
            write!(f, " {b:02x}")?;
        }
        f.write_str(" |")?;
        for b in self.optional_data {
            write!(f, " {b:02x}")?;
        }
        Ok(())
    }
}
