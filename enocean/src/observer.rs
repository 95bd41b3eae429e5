//! Notifications of the gateway to the application.
//!
//! For every chunk the notifications fire in pipeline order: a `received_*`
//! notification always precedes the unfamiliarity reported for the same
//! item.

use crate::device::DeviceInfo;
use crate::frame::{self, DeviceId, Erp1TelegramRepr, PacketRepr, UteRepr};

/// Why a packet was not processed any further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketUnfamiliarity {
    ResponseParsingError(frame::Error),
    Erp1ParsingError(frame::Error),
    PacketTypeUnsupported,
}

/// Why a telegram was not processed any further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelegramUnfamiliarity {
    UteParsingError(frame::Error),
    /// Neither sender nor destination is a known device.
    DeviceUnknown,
    /// The device is known, its profile is not.
    EepUnknown,
    /// No parser is registered for the profile of the device.
    EepUnsupported,
    /// The parser of the profile failed.
    EepParsingError(frame::Error),
}

/// Receives the notifications of a [`Gateway`](crate::gateway::Gateway).
///
/// Every method has an empty default implementation. `M` is the message type
/// produced by the registered profile parsers.
pub trait Observer<M> {
    /// A chunk was read from the transport.
    fn received_data(&self, _data: &[u8]) {}
    /// A chunk could not be decoded as a packet.
    fn received_unparseable_data(&self, _data: &[u8], _error: frame::Error) {}
    fn received_packet(&self, _packet: &PacketRepr<'_>) {}
    fn received_packet_unfamiliar(&self, _packet: &PacketRepr<'_>, _reason: PacketUnfamiliarity) {}
    fn received_telegram(&self, _telegram: &Erp1TelegramRepr) {}
    fn received_telegram_unfamiliar(
        &self,
        _telegram: &Erp1TelegramRepr,
        _reason: TelegramUnfamiliarity,
    ) {
    }
    /// A UTE telegram was decoded, whether or not the gateway is learning.
    fn received_teach_in_message(&self, _message: &UteRepr, _sender: DeviceId) {}
    /// A profile parser decoded a data telegram.
    fn received_eep_message(&self, _message: &M, _telegram: &Erp1TelegramRepr) {}
    fn device_taught_in(&self, _device: &DeviceInfo) {}
    /// Learning mode ended, `manually` is `false` when it timed out.
    fn learning_stopped(&self, _manually: bool) {}
}

impl<M> Observer<M> for () {}

impl<M, O: Observer<M>> Observer<M> for &O {
    fn received_data(&self, data: &[u8]) {
        (**self).received_data(data)
    }
    fn received_unparseable_data(&self, data: &[u8], error: frame::Error) {
        (**self).received_unparseable_data(data, error)
    }
    fn received_packet(&self, packet: &PacketRepr<'_>) {
        (**self).received_packet(packet)
    }
    fn received_packet_unfamiliar(&self, packet: &PacketRepr<'_>, reason: PacketUnfamiliarity) {
        (**self).received_packet_unfamiliar(packet, reason)
    }
    fn received_telegram(&self, telegram: &Erp1TelegramRepr) {
        (**self).received_telegram(telegram)
    }
    fn received_telegram_unfamiliar(
        &self,
        telegram: &Erp1TelegramRepr,
        reason: TelegramUnfamiliarity,
    ) {
        (**self).received_telegram_unfamiliar(telegram, reason)
    }
    fn received_teach_in_message(&self, message: &UteRepr, sender: DeviceId) {
        (**self).received_teach_in_message(message, sender)
    }
    fn received_eep_message(&self, message: &M, telegram: &Erp1TelegramRepr) {
        (**self).received_eep_message(message, telegram)
    }
    fn device_taught_in(&self, device: &DeviceInfo) {
        (**self).device_taught_in(device)
    }
    fn learning_stopped(&self, manually: bool) {
        (**self).learning_stopped(manually)
    }
}
