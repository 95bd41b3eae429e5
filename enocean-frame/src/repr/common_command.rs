use super::PacketRepr;
use crate::{buffer_len, CommonCommandCode, Error, Esp3Packet, PacketType, Result};

/// A high-level representation of a common command packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct CommonCommandRepr<'p> {
    /// The command code.
    pub code: CommonCommandCode,
    /// The command data following the command code.
    pub data: &'p [u8],
    /// The optional data.
    pub optional_data: &'p [u8],
}

impl<'p> CommonCommandRepr<'p> {
    /// Create a command without data.
    pub fn new(code: CommonCommandCode) -> Self {
        Self {
            code,
            data: &[],
            optional_data: &[],
        }
    }

    /// Parse a common command packet.
    pub fn parse(packet: &PacketRepr<'p>) -> Result<Self> {
        if packet.packet_type != PacketType::CommonCommand {
            return Err(Error::WrongPacketType);
        }

        let Some((&code, data)) = packet.data.split_first() else {
            return Err(Error::DataTooShort);
        };

        Ok(Self {
            code: CommonCommandCode::from(code),
            data,
            optional_data: packet.optional_data,
        })
    }

    /// Validate that the command fits a packet.
    pub fn validate(&self) -> Result<()> {
        if self.data.len() >= u16::MAX as usize || self.optional_data.len() > u8::MAX as usize {
            return Err(Error::Length);
        }

        Ok(())
    }

    /// Return the length of the packet when emitted into a buffer.
    pub fn buffer_len(&self) -> usize {
        buffer_len(1 + self.data.len(), self.optional_data.len())
    }

    /// Emit the command as an ESP3 packet.
    pub fn emit(&self, packet: &mut Esp3Packet<&'_ mut [u8]>) {
        packet.set_sync_byte();
        packet.set_data_len(1 + self.data.len() as u16);
        packet.set_optional_len(self.optional_data.len() as u8);
        packet.set_packet_type(PacketType::CommonCommand);
        packet.fill_header_crc();

        let data = packet.data_mut();
        data[0] = self.code.into();
        data[1..].copy_from_slice(self.data);
        packet.optional_data_mut().copy_from_slice(self.optional_data);
        packet.fill_data_crc();
    }
}
