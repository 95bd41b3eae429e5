use embedded_hal_async::delay::DelayNs;

use super::{Error, Gateway};
use crate::config::TX_BUFFER_LEN;
use crate::device::DeviceRegistry;
use crate::frame::{
    BaseIdRepr, CommonCommandCode, CommonCommandRepr, DeviceId, Erp1TelegramRepr, Esp3Packet,
    PacketRepr, ResponseRepr, ReturnCode, VersionRepr,
};
use crate::observer::Observer;
use crate::sync::{select::select, Either};
use crate::transport::Transport;

pub(super) fn check_return_code(return_code: ReturnCode) -> Result<(), Error> {
    if return_code.is_ok() {
        Ok(())
    } else {
        Err(Error::ResponseNotOk(return_code))
    }
}

impl<T, D, O, TIMER, M> Gateway<T, D, O, TIMER, M>
where
    T: Transport,
    D: DeviceRegistry,
    O: Observer<M>,
    TIMER: DelayNs + Clone,
{
    /// Write a complete packet to the module.
    ///
    /// Waits for a send in progress to finish first. With
    /// `wait_for_response`, the send lock is held until the module responds,
    /// and that response is returned.
    pub async fn send_bytes(
        &self,
        bytes: &[u8],
        wait_for_response: bool,
    ) -> Result<Option<ResponseRepr>, Error> {
        let mut timer = self.timer.clone();

        let _guard = match select(
            self.send_lock.lock(),
            timer.delay_ms(self.config.send_lock_timeout.as_delay_ms()),
        )
        .await
        {
            Either::First(guard) => guard,
            Either::Second(()) => {
                warn!(
                    "send still busy after {}ms",
                    self.config.send_lock_timeout.as_ms()
                );
                return Err(Error::SendBusyTimeout);
            }
        };

        self.response.clear();
        if self.transport.write(bytes).await.is_err() {
            error!("writing to the transport failed");
            return Err(Error::Transport);
        }

        if !wait_for_response {
            return Ok(None);
        }

        match select(
            self.response.receive(),
            timer.delay_ms(self.config.response_timeout.as_delay_ms()),
        )
        .await
        {
            Either::First(response) => Ok(Some(response)),
            Either::Second(()) => {
                warn!(
                    "no response within {}ms",
                    self.config.response_timeout.as_ms()
                );
                Err(Error::ResponseTimeout)
            }
        }
    }

    /// Emit a packet of `len` bytes, send it and wait for the response.
    async fn request(
        &self,
        len: usize,
        emit: impl FnOnce(&mut Esp3Packet<&mut [u8]>),
    ) -> Result<ResponseRepr, Error> {
        let mut buffer = [0u8; TX_BUFFER_LEN];
        if len > buffer.len() {
            return Err(Error::PacketTooLarge);
        }

        emit(&mut Esp3Packet::new_unchecked(&mut buffer[..len]));
        self.send_bytes(&buffer[..len], true)
            .await?
            .ok_or(Error::ResponseTimeout)
    }

    /// Send a packet and return the return code of the module.
    pub async fn send_packet(&self, packet: &PacketRepr<'_>) -> Result<ReturnCode, Error> {
        packet.validate()?;
        let response = self
            .request(packet.buffer_len(), |buffer| packet.emit(buffer))
            .await?;
        Ok(response.return_code)
    }

    /// Send a radio telegram and return the return code of the module.
    ///
    /// A sender the module may not use is replaced by the local id of the
    /// destination device, or else by the chip id.
    pub async fn send_telegram(&self, telegram: &Erp1TelegramRepr) -> Result<ReturnCode, Error> {
        let mut telegram = telegram.clone();
        self.repair_sender(&mut telegram).await?;

        self.send_telegram_unchanged(&telegram).await
    }

    /// Send a telegram with its sender as is.
    pub(super) async fn send_telegram_unchanged(
        &self,
        telegram: &Erp1TelegramRepr,
    ) -> Result<ReturnCode, Error> {
        let response = self
            .request(telegram.buffer_len(), |buffer| telegram.emit(buffer))
            .await?;
        Ok(response.return_code)
    }

    /// Send a common command and return the full response.
    pub async fn send_common_command(
        &self,
        command: &CommonCommandRepr<'_>,
    ) -> Result<ResponseRepr, Error> {
        command.validate()?;
        self.request(command.buffer_len(), |buffer| command.emit(buffer))
            .await
    }

    async fn repair_sender(&self, telegram: &mut Erp1TelegramRepr) -> Result<(), Error> {
        if self.is_valid_sender(telegram.sender).await? {
            return Ok(());
        }

        let local_id = self
            .devices
            .borrow()
            .get(telegram.destination)
            .map(|device| device.local_id);

        let sender = match local_id {
            Some(local_id) if local_id != telegram.sender => {
                if self.is_valid_sender(local_id).await? {
                    local_id
                } else {
                    self.chip_id().await?
                }
            }
            _ => self.chip_id().await?,
        };

        debug!("sending from {} instead of {}", sender, telegram.sender);
        telegram.sender = sender;
        Ok(())
    }

    /// Returns `true` when the module may send from `sender`: its chip id or
    /// one of the 128 addresses starting at its base id.
    pub async fn is_valid_sender(&self, sender: DeviceId) -> Result<bool, Error> {
        if sender.is_gateway_selects_sender() {
            return Ok(false);
        }

        let chip_id = self.chip_id().await?;
        if sender == chip_id {
            return Ok(true);
        }

        let base_id = self.base_id().await?;
        Ok(sender.is_valid_sender(chip_id, Some(base_id)))
    }

    /// Version information of the module, read once and cached.
    pub async fn version_info(&self) -> Result<VersionRepr, Error> {
        let cached = self.module.borrow().version.clone();
        if let Some(version) = cached {
            return Ok(version);
        }

        let response = self
            .send_common_command(&CommonCommandRepr::new(CommonCommandCode::ReadVersion))
            .await?;
        check_return_code(response.return_code)?;
        let version = VersionRepr::parse(&response)?;

        info!(
            "module {} version {}, chip id {}",
            version.app_description.as_str(),
            version.app_version,
            version.chip_id
        );
        self.module.borrow_mut().version = Some(version.clone());
        Ok(version)
    }

    /// The chip id of the module, the default sender address.
    pub async fn chip_id(&self) -> Result<DeviceId, Error> {
        let chip_id = self.version_info().await?.chip_id;
        if chip_id.is_gateway_selects_sender() {
            return Err(Error::ChipIdUnavailable);
        }

        Ok(chip_id)
    }

    /// Base id information of the module, read once and cached until the
    /// base id is changed.
    pub async fn base_id_info(&self) -> Result<BaseIdRepr, Error> {
        let cached = self.module.borrow().base_id;
        if let Some(base_id) = cached {
            return Ok(base_id);
        }

        let response = self
            .send_common_command(&CommonCommandRepr::new(CommonCommandCode::ReadIdBase))
            .await?;
        check_return_code(response.return_code)?;
        let base_id = BaseIdRepr::parse(&response)?;

        self.module.borrow_mut().base_id = Some(base_id);
        Ok(base_id)
    }

    /// The first of the 128 sender addresses of the module.
    pub async fn base_id(&self) -> Result<DeviceId, Error> {
        Ok(self.base_id_info().await?.base_id)
    }

    /// How often the base id may still be changed, if the module tells.
    pub async fn base_id_remaining_writes(&self) -> Result<Option<u8>, Error> {
        Ok(self.base_id_info().await?.remaining_writes)
    }

    /// Change the base id of the module. The module allows this only a
    /// limited number of times.
    pub async fn set_base_id(&self, base_id: DeviceId) -> Result<(), Error> {
        if !base_id.is_valid_base_id() {
            return Err(Error::InvalidBaseId);
        }

        self.module.borrow_mut().base_id = None;

        let bytes = base_id.to_bytes();
        let response = self
            .send_common_command(&CommonCommandRepr {
                code: CommonCommandCode::WriteIdBase,
                data: &bytes,
                optional_data: &[],
            })
            .await?;
        check_return_code(response.return_code)?;

        info!("base id set to {}", base_id);
        Ok(())
    }
}
