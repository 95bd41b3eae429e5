use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// A 32-bit EnOcean device address.
///
/// Two values are reserved: [`DeviceId::GATEWAY_SELECTS_SENDER`] (`0`) is a
/// placeholder asking the gateway to pick a sender address, and
/// [`DeviceId::BROADCAST`] (`0xFFFFFFFF`) addresses every device.
///
/// The canonical string form is four upper case hex octets in big endian
/// order, separated by colons: `01:A2:B3:FF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct DeviceId(u32);

impl DeviceId {
    /// The broadcast address.
    pub const BROADCAST: Self = Self(0xffff_ffff);
    /// Let the gateway select an appropriate sender address.
    pub const GATEWAY_SELECTS_SENDER: Self = Self(0);

    /// Number of consecutive sender addresses starting at a base id.
    pub const BASE_ID_RANGE_LEN: u32 = 128;
    /// Lowest valid base id.
    pub const BASE_ID_MIN: Self = Self(0xff80_0000);
    /// Highest valid base id.
    pub const BASE_ID_MAX: Self = Self(0xffff_ff80);

    /// Create a device id from its numeric value.
    pub const fn from_u32(id: u32) -> Self {
        Self(id)
    }

    /// Return the numeric value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Create a device id from its big endian wire representation.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Return the big endian wire representation.
    pub const fn to_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Returns `true` for the broadcast address.
    pub const fn is_broadcast(&self) -> bool {
        self.0 == Self::BROADCAST.0
    }

    /// Returns `true` for the "gateway selects the sender" placeholder.
    pub const fn is_gateway_selects_sender(&self) -> bool {
        self.0 == Self::GATEWAY_SELECTS_SENDER.0
    }

    /// Returns `true` when this id lies in the range a base id may take.
    pub const fn is_valid_base_id(&self) -> bool {
        self.0 >= Self::BASE_ID_MIN.0 && self.0 <= Self::BASE_ID_MAX.0
    }

    /// Returns `true` when a module with the given chip id and base id may
    /// send with this id as sender address.
    pub fn is_valid_sender(&self, chip_id: DeviceId, base_id: Option<DeviceId>) -> bool {
        if self.is_gateway_selects_sender() {
            return false;
        }

        if *self == chip_id {
            return true;
        }

        match base_id {
            Some(base) => {
                self.0 >= base.0 && self.0 - base.0 < Self::BASE_ID_RANGE_LEN
            }
            None => false,
        }
    }
}

impl From<u32> for DeviceId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<DeviceId> for u32 {
    fn from(value: DeviceId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for DeviceId {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| Error::DeviceIdOutOfRange)
    }
}

impl FromStr for DeviceId {
    type Err = Error;

    /// Parse `AA:BB:CC:DD`. Octets may be a single hex digit.
    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = [0u8; 4];
        let mut parts = s.trim().split(':');

        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or(Error::InvalidFormat)?;
            if part.is_empty() || part.len() > 2 {
                return Err(Error::InvalidFormat);
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| Error::InvalidFormat)?;
        }

        if parts.next().is_some() {
            return Err(Error::InvalidFormat);
        }

        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.to_bytes();
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceId {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d] = self.to_bytes();
        defmt::write!(f, "{=u8:02X}:{=u8:02X}:{=u8:02X}:{=u8:02X}", a, b, c, d)
    }
}
