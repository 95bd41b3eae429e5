use core::fmt;

use heapless::{String, Vec};

use super::PacketRepr;
use crate::{buffer_len, DeviceId, Error, Esp3Packet, PacketType, Result, ReturnCode};

/// Maximum number of response data bytes, the return code excluded.
pub const MAX_RESPONSE_DATA_LEN: usize = 64;
/// Maximum number of response optional data bytes.
pub const MAX_RESPONSE_OPTIONAL_LEN: usize = 16;

/// A high-level representation of a response packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRepr {
    /// The return code.
    pub return_code: ReturnCode,
    /// The response data following the return code.
    pub data: Vec<u8, MAX_RESPONSE_DATA_LEN>,
    /// The optional data.
    pub optional_data: Vec<u8, MAX_RESPONSE_OPTIONAL_LEN>,
}

impl ResponseRepr {
    /// Create a response without data.
    pub fn new(return_code: ReturnCode) -> Self {
        Self {
            return_code,
            data: Vec::new(),
            optional_data: Vec::new(),
        }
    }

    /// Parse a response packet.
    pub fn parse(packet: &PacketRepr<'_>) -> Result<Self> {
        if packet.packet_type != PacketType::Response {
            return Err(Error::WrongPacketType);
        }

        let Some((&return_code, data)) = packet.data.split_first() else {
            return Err(Error::ResponseTooShort);
        };

        Ok(Self {
            return_code: ReturnCode::from(return_code),
            data: Vec::from_slice(data).map_err(|_| Error::ResponseTooLong)?,
            optional_data: Vec::from_slice(packet.optional_data)
                .map_err(|_| Error::ResponseTooLong)?,
        })
    }

    /// Return an error unless the return code is [`ReturnCode::Ok`].
    pub fn check_ok(&self) -> Result<()> {
        if self.return_code.is_ok() {
            Ok(())
        } else {
            Err(Error::ResponseNotOk)
        }
    }

    /// Return the length of the packet when emitted into a buffer.
    pub fn buffer_len(&self) -> usize {
        buffer_len(1 + self.data.len(), self.optional_data.len())
    }

    /// Emit the response as an ESP3 packet.
    pub fn emit(&self, packet: &mut Esp3Packet<&'_ mut [u8]>) {
        packet.set_sync_byte();
        packet.set_data_len(1 + self.data.len() as u16);
        packet.set_optional_len(self.optional_data.len() as u8);
        packet.set_packet_type(PacketType::Response);
        packet.fill_header_crc();

        let data = packet.data_mut();
        data[0] = self.return_code.into();
        data[1..].copy_from_slice(&self.data);
        packet.optional_data_mut().copy_from_slice(&self.optional_data);
        packet.fill_data_crc();
    }
}

/// A four part version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionIdentifier {
    /// Main version.
    pub main: u8,
    /// Beta version.
    pub beta: u8,
    /// Alpha version.
    pub alpha: u8,
    /// Build.
    pub build: u8,
}

impl VersionIdentifier {
    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            main: bytes[0],
            beta: bytes[1],
            alpha: bytes[2],
            build: bytes[3],
        }
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.main, self.beta, self.alpha, self.build)
    }
}

/// Version information, the answer to a read version command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRepr {
    /// Version of the application running on the module.
    pub app_version: VersionIdentifier,
    /// Version of the API.
    pub api_version: VersionIdentifier,
    /// Chip id, also the default sender address of the module.
    pub chip_id: DeviceId,
    /// Chip version.
    pub chip_version: u32,
    /// Application description.
    pub app_description: String<16>,
}

impl VersionRepr {
    const DATA_LEN: usize = 32;

    /// Parse the response to a read version command.
    pub fn parse(response: &ResponseRepr) -> Result<Self> {
        response.check_ok()?;

        let data = &response.data;
        if data.len() < Self::DATA_LEN {
            return Err(Error::ResponseTooShort);
        }

        let description = &data[16..32];
        let description = match description.iter().position(|&b| b == 0) {
            Some(end) => &description[..end],
            None => description,
        };
        let description = match core::str::from_utf8(description) {
            Ok(s) => s,
            Err(err) => core::str::from_utf8(&description[..err.valid_up_to()])
                .map_err(|_| Error::InvalidFormat)?,
        };
        let mut app_description = String::new();
        app_description
            .push_str(description)
            .map_err(|_| Error::ResponseTooLong)?;

        Ok(Self {
            app_version: VersionIdentifier::from_bytes(&data[0..4]),
            api_version: VersionIdentifier::from_bytes(&data[4..8]),
            chip_id: DeviceId::from_bytes([data[8], data[9], data[10], data[11]]),
            chip_version: u32::from_be_bytes([data[12], data[13], data[14], data[15]]),
            app_description,
        })
    }
}

/// Base id information, the answer to a read base id command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaseIdRepr {
    /// First of the 128 sender addresses reserved for the module.
    pub base_id: DeviceId,
    /// How often the base id may still be changed.
    pub remaining_writes: Option<u8>,
}

impl BaseIdRepr {
    /// Parse the response to a read base id command.
    pub fn parse(response: &ResponseRepr) -> Result<Self> {
        response.check_ok()?;

        let data = &response.data;
        if data.len() < 4 {
            return Err(Error::ResponseTooShort);
        }

        Ok(Self {
            base_id: DeviceId::from_bytes([data[0], data[1], data[2], data[3]]),
            remaining_writes: response.optional_data.first().copied(),
        })
    }
}
