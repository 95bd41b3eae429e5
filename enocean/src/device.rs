//! Taught in devices and where they are kept.

use heapless::{String, Vec};

use crate::config::MAX_KNOWN_DEVICES;
use crate::frame::{DeviceId, EepId};

/// How a device got taught in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TeachInMethod {
    #[default]
    Unknown,
    /// Added by the application.
    Manual,
    /// Universal Teach-In handshake.
    Ute,
    /// 4BS learn telegram.
    FourBs,
}

/// Everything the gateway knows about a device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// Address of the device.
    pub device_id: DeviceId,
    /// Profile of the device, when known.
    pub eep: Option<EepId>,
    /// The gateway address the device was taught in with. Telegrams to the
    /// device are sent from this address.
    pub local_id: DeviceId,
    /// Manufacturer id, 11 bits.
    pub manufacturer_id: u16,
    pub teach_in_method: TeachInMethod,
    pub label: Option<String<32>>,
}

impl DeviceInfo {
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            eep: None,
            local_id: DeviceId::GATEWAY_SELECTS_SENDER,
            manufacturer_id: 0,
            teach_in_method: TeachInMethod::Unknown,
            label: None,
        }
    }
}

/// The registry is full, the record was not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegistryFull;

/// Storage of device records, keyed by device address.
pub trait DeviceRegistry {
    fn get(&self, device_id: DeviceId) -> Option<DeviceInfo>;

    /// Insert or overwrite the record of `info.device_id`.
    fn set(&mut self, info: DeviceInfo) -> Result<(), RegistryFull>;

    fn has(&self, device_id: DeviceId) -> bool {
        self.get(device_id).is_some()
    }

    /// Remove a record. Returns `false` if there was none.
    fn delete(&mut self, device_id: DeviceId) -> bool;

    /// Visit every record, in insertion order.
    fn for_each<F: FnMut(&DeviceInfo)>(&self, f: F);

    fn clear(&mut self);
}

/// A [`DeviceRegistry`] holding up to `N` records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry<const N: usize = MAX_KNOWN_DEVICES> {
    devices: Vec<DeviceInfo, N>,
}

impl<const N: usize> MemoryRegistry<N> {
    pub const fn new() -> Self {
        Self { devices: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn position(&self, device_id: DeviceId) -> Option<usize> {
        self.devices
            .iter()
            .position(|info| info.device_id == device_id)
    }
}

impl<const N: usize> DeviceRegistry for MemoryRegistry<N> {
    fn get(&self, device_id: DeviceId) -> Option<DeviceInfo> {
        self.position(device_id).map(|i| self.devices[i].clone())
    }

    fn set(&mut self, info: DeviceInfo) -> Result<(), RegistryFull> {
        match self.position(info.device_id) {
            Some(i) => {
                self.devices[i] = info;
                Ok(())
            }
            None => self.devices.push(info).map_err(|_| RegistryFull),
        }
    }

    fn delete(&mut self, device_id: DeviceId) -> bool {
        match self.position(device_id) {
            Some(i) => {
                self.devices.remove(i);
                true
            }
            None => false,
        }
    }

    fn for_each<F: FnMut(&DeviceInfo)>(&self, f: F) {
        self.devices.iter().for_each(f)
    }

    fn clear(&mut self) {
        self.devices.clear()
    }
}
