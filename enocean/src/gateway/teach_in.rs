use embedded_hal_async::delay::DelayNs;

use super::send::check_return_code;
use super::{Error, Gateway, LearningCommand, PendingTeachIn};
use crate::config::MIN_LEARNING_TIMEOUT;
use crate::device::{DeviceInfo, DeviceRegistry, TeachInMethod};
use crate::frame::{
    DeviceId, EepId, Erp1TelegramRepr, FourBsTeachInRepr, UteKind, UteQueryRequestType, UteRepr,
    UteResponseRequestType,
};
use crate::observer::{Observer, TelegramUnfamiliarity};
use crate::sync::{select::select, Either};
use crate::time::Duration;
use crate::transport::Transport;

impl<T, D, O, TIMER, M> Gateway<T, D, O, TIMER, M>
where
    T: Transport,
    D: DeviceRegistry,
    O: Observer<M>,
    TIMER: DelayNs + Clone,
{
    /// Accept teach-in telegrams for `timeout`. Teach-in responses are sent
    /// from `sender`, [`DeviceId::GATEWAY_SELECTS_SENDER`] picks the chip id.
    ///
    /// Starting again while learning restarts the timer.
    pub async fn start_learning(&self, timeout: Duration, sender: DeviceId) -> Result<(), Error> {
        if timeout < MIN_LEARNING_TIMEOUT {
            return Err(Error::InvalidLearningTimeout);
        }

        let sender = if sender.is_gateway_selects_sender() {
            self.chip_id().await?
        } else {
            sender
        };

        if !self.is_valid_sender(sender).await? {
            return Err(Error::InvalidSender);
        }

        info!("learning for {}ms as {}", timeout.as_ms(), sender);
        self.learning.set(Some(sender));
        self.learning_signal.send(LearningCommand::Start(timeout));
        Ok(())
    }

    /// [`Gateway::start_learning`] with the configured default timeout and
    /// the chip id as sender.
    pub async fn start_learning_default(&self) -> Result<(), Error> {
        self.start_learning(
            self.config.default_learning_timeout,
            DeviceId::GATEWAY_SELECTS_SENDER,
        )
        .await
    }

    /// Leave learning mode. Does nothing when not learning.
    pub fn stop_learning(&self) {
        if self.learning.take().is_some() {
            info!("learning stopped");
            self.learning_signal.send(LearningCommand::Stop);
            self.observer.learning_stopped(true);
        }
    }

    pub fn is_learning(&self) -> bool {
        self.learning.get().is_some()
    }

    /// The sender of teach-in responses, while learning.
    pub fn learning_sender(&self) -> Option<DeviceId> {
        self.learning.get()
    }

    /// Stops learning mode when its time is up.
    pub(super) async fn learning_task(&self) -> ! {
        let mut timer = self.timer.clone();
        let mut timeout: Option<Duration> = None;

        loop {
            let command = match timeout {
                None => Some(self.learning_signal.receive().await),
                Some(timeout) => match select(
                    self.learning_signal.receive(),
                    timer.delay_ms(timeout.as_delay_ms()),
                )
                .await
                {
                    Either::First(command) => Some(command),
                    Either::Second(()) => None,
                },
            };

            timeout = match command {
                Some(LearningCommand::Start(timeout)) => Some(timeout),
                Some(LearningCommand::Stop) => None,
                None => {
                    if self.learning.take().is_some() {
                        info!("learning timed out");
                        self.observer.learning_stopped(false);
                    }
                    None
                }
            };
        }
    }

    /// Add a device without a teach-in handshake.
    /// [`DeviceId::GATEWAY_SELECTS_SENDER`] as `local_id` picks the chip id.
    pub async fn teach_device(
        &self,
        device_id: DeviceId,
        eep: EepId,
        manufacturer_id: u16,
        local_id: DeviceId,
    ) -> Result<DeviceInfo, Error> {
        let local_id = if local_id.is_gateway_selects_sender() {
            self.chip_id().await?
        } else {
            local_id
        };

        let device = DeviceInfo {
            eep: Some(eep),
            local_id,
            manufacturer_id,
            teach_in_method: TeachInMethod::Manual,
            ..DeviceInfo::new(device_id)
        };
        self.devices
            .borrow_mut()
            .set(device.clone())
            .map_err(|_| Error::RegistryFull)?;

        info!("taught in {} as {}", device_id, eep);
        self.observer.device_taught_in(&device);
        Ok(device)
    }

    pub(super) fn process_ute(&self, telegram: &Erp1TelegramRepr) {
        let message = match UteRepr::parse(telegram) {
            Ok(message) => message,
            Err(err) => {
                self.telegram_unfamiliar(telegram, TelegramUnfamiliarity::UteParsingError(err));
                return;
            }
        };
        self.observer
            .received_teach_in_message(&message, telegram.sender);

        let Some(local_id) = self.learning.get() else {
            debug!("not learning, ignoring teach-in of {}", telegram.sender);
            return;
        };

        if let UteKind::Query(request_type) = message.kind {
            let pending = PendingTeachIn {
                query: message,
                request_type,
                sender: telegram.sender,
                local_id,
            };
            if self.teach_ins.push(pending).is_err() {
                warn!("too many pending teach-ins, ignoring {}", telegram.sender);
            }
        }
    }

    /// Answers the teach-in queries queued by the receive pipeline.
    pub(super) async fn teach_in_task(&self) -> ! {
        loop {
            let pending = self.teach_ins.receive().await;
            self.answer_teach_in(pending).await;
        }
    }

    async fn answer_teach_in(&self, pending: PendingTeachIn) {
        let PendingTeachIn {
            query,
            request_type,
            sender,
            local_id,
        } = pending;
        let known = self.devices.borrow().has(sender);

        let (response_type, taught_in) = match request_type {
            UteQueryRequestType::TeachInDeletion | UteQueryRequestType::TeachInOrDeletion
                if known =>
            {
                let deleted = self.devices.borrow_mut().delete(sender);
                info!("teach-in of {} deleted", sender);
                let response_type = if deleted {
                    UteResponseRequestType::AcceptedDeletion
                } else {
                    UteResponseRequestType::NotAccepted
                };
                (response_type, None)
            }
            _ if known => {
                warn!("{} is already taught in, ignoring teach-in", sender);
                return;
            }
            UteQueryRequestType::TeachInDeletion => {
                debug!("{} is not taught in, nothing to delete", sender);
                return;
            }
            _ => {
                let device = DeviceInfo {
                    eep: Some(query.eep),
                    local_id,
                    manufacturer_id: query.manufacturer_id,
                    teach_in_method: TeachInMethod::Ute,
                    ..DeviceInfo::new(sender)
                };
                let stored = self.devices.borrow_mut().set(device.clone());
                match stored {
                    Ok(()) => (UteResponseRequestType::AcceptedTeachIn, Some(device)),
                    Err(_) => {
                        warn!("device registry full, rejecting {}", sender);
                        (UteResponseRequestType::NotAccepted, None)
                    }
                }
            }
        };

        let response = query.response(response_type).to_telegram(local_id, sender);
        let sent = self
            .send_telegram_unchanged(&response)
            .await
            .and_then(check_return_code);
        if let Err(err) = sent {
            warn!("teach-in response to {} failed: {}", sender, err);
            // Unknown again, so that the device can retry
            if taught_in.is_some() {
                self.devices.borrow_mut().delete(sender);
            }
            return;
        }

        if let Some(device) = taught_in {
            info!("taught in {} as {}", sender, query.eep);
            self.observer.device_taught_in(&device);
        }
    }

    pub(super) fn process_four_bs_teach_in(&self, telegram: &Erp1TelegramRepr) {
        let Some(local_id) = self.learning.get() else {
            return;
        };

        let teach_in = match FourBsTeachInRepr::parse(telegram) {
            Ok(teach_in) => teach_in,
            Err(err) => {
                warn!("invalid 4BS teach-in from {}: {}", telegram.sender, err);
                return;
            }
        };

        let mut device = DeviceInfo {
            local_id,
            teach_in_method: TeachInMethod::FourBs,
            ..DeviceInfo::new(telegram.sender)
        };
        if let Some((eep, manufacturer_id)) = teach_in.eep {
            device.eep = Some(eep);
            device.manufacturer_id = manufacturer_id;
        }

        let stored = self.devices.borrow_mut().set(device.clone());
        if stored.is_err() {
            warn!("device registry full, ignoring {}", telegram.sender);
            return;
        }

        info!("taught in {} with 4BS learn", telegram.sender);
        self.observer.device_taught_in(&device);
    }
}
