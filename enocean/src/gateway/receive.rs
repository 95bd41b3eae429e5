use embedded_hal_async::delay::DelayNs;

use super::{Error, Gateway};
use crate::config::RX_BUFFER_LEN;
use crate::device::DeviceRegistry;
use crate::frame::{
    Erp1TelegramRepr, Esp3Packet, FourBsTeachInRepr, PacketRepr, PacketType, ResponseRepr, Rorg,
};
use crate::observer::{Observer, PacketUnfamiliarity, TelegramUnfamiliarity};
use crate::transport::Transport;

impl<T, D, O, TIMER, M> Gateway<T, D, O, TIMER, M>
where
    T: Transport,
    D: DeviceRegistry,
    O: Observer<M>,
    TIMER: DelayNs + Clone,
{
    pub(super) async fn receive_task(&self) -> Error {
        let mut buffer = [0u8; RX_BUFFER_LEN];

        loop {
            match self.transport.read(&mut buffer).await {
                Ok(len) => self.process_chunk(&buffer[..len.min(RX_BUFFER_LEN)]),
                Err(_) => {
                    error!("reading from the transport failed");
                    return Error::Transport;
                }
            }
        }
    }

    /// Run one chunk through the receive pipeline. Failures are reported to
    /// the observer and end the processing of the chunk.
    pub(super) fn process_chunk(&self, chunk: &[u8]) {
        self.observer.received_data(chunk);

        let packet = match Esp3Packet::new(chunk) {
            Ok(packet) => packet,
            Err(err) => {
                debug!("dropping {} bytes: {}", chunk.len(), err);
                self.observer.received_unparseable_data(chunk, err);
                return;
            }
        };
        let packet = PacketRepr::parse(&packet);
        self.observer.received_packet(&packet);

        match packet.packet_type {
            PacketType::Response => match ResponseRepr::parse(&packet) {
                Ok(response) => {
                    trace!("response {}", response.return_code);
                    if self.response.send(response) {
                        debug!("dropped a response nobody waited for");
                    }
                }
                Err(err) => {
                    self.packet_unfamiliar(&packet, PacketUnfamiliarity::ResponseParsingError(err))
                }
            },
            PacketType::RadioErp1 => match Erp1TelegramRepr::parse(&packet) {
                Ok(telegram) => {
                    self.observer.received_telegram(&telegram);
                    self.process_telegram(&telegram);
                }
                Err(err) => {
                    self.packet_unfamiliar(&packet, PacketUnfamiliarity::Erp1ParsingError(err))
                }
            },
            _ => self.packet_unfamiliar(&packet, PacketUnfamiliarity::PacketTypeUnsupported),
        }
    }

    fn process_telegram(&self, telegram: &Erp1TelegramRepr) {
        match telegram.rorg {
            Rorg::Ute => self.process_ute(telegram),
            Rorg::FourBs if FourBsTeachInRepr::is_teach_in(telegram) && self.is_learning() => {
                self.process_four_bs_teach_in(telegram)
            }
            rorg if rorg.is_data() => self.process_data(telegram),
            rorg => trace!("ignoring {:?} telegram from {}", rorg, telegram.sender),
        }
    }

    /// Hand a data telegram to the parser of the profile of its device.
    fn process_data(&self, telegram: &Erp1TelegramRepr) {
        // Replies of the gateway address the device in the destination.
        let device = {
            let devices = self.devices.borrow();
            devices
                .get(telegram.sender)
                .or_else(|| devices.get(telegram.destination))
        };

        let Some(device) = device else {
            self.telegram_unfamiliar(telegram, TelegramUnfamiliarity::DeviceUnknown);
            return;
        };

        let Some(eep) = device.eep else {
            self.telegram_unfamiliar(telegram, TelegramUnfamiliarity::EepUnknown);
            return;
        };

        let parser = self.parsers.borrow().get(&eep);
        let Some(parser) = parser else {
            self.telegram_unfamiliar(telegram, TelegramUnfamiliarity::EepUnsupported);
            return;
        };

        match parser(telegram) {
            Ok(message) => self.observer.received_eep_message(&message, telegram),
            Err(err) => {
                self.telegram_unfamiliar(telegram, TelegramUnfamiliarity::EepParsingError(err))
            }
        }
    }

    fn packet_unfamiliar(&self, packet: &PacketRepr<'_>, reason: PacketUnfamiliarity) {
        debug!("unfamiliar {:?} packet: {:?}", packet.packet_type, reason);
        self.observer.received_packet_unfamiliar(packet, reason);
    }

    pub(super) fn telegram_unfamiliar(
        &self,
        telegram: &Erp1TelegramRepr,
        reason: TelegramUnfamiliarity,
    ) {
        debug!("unfamiliar telegram from {}: {:?}", telegram.sender, reason);
        self.observer.received_telegram_unfamiliar(telegram, reason);
    }
}
