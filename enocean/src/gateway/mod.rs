//! The gateway engine.
//!
//! A [`Gateway`] owns the transport to the transceiver module. Everything
//! happens inside [`Gateway::run`]: chunks are read and pushed through the
//! receive pipeline one at a time, teach-in queries are answered, and
//! learning mode is stopped when its timer runs out. The other operations take `&self` and are meant to run
//! concurrently with `run`, joined or selected within the same task.
//!
//! Commands to the module are strictly serialized. A send takes the send
//! lock, clears the response slot, writes, and waits for the next response
//! packet the receive pipeline puts into the slot. The receive pipeline
//! itself never sends, teach-in responses are queued for a separate task.

use core::cell::{Cell, RefCell};
use core::fmt;

use embedded_hal_async::delay::DelayNs;

use crate::config::{GatewayConfig, MAX_PENDING_TEACH_INS};
use crate::device::{DeviceInfo, DeviceRegistry};
use crate::eep::{EepParser, ParserRegistry};
use crate::frame::{
    self, BaseIdRepr, DeviceId, EepId, ResponseRepr, ReturnCode, UteQueryRequestType, UteRepr,
    VersionRepr,
};
use crate::observer::Observer;
use crate::sync::{channel::Channel, mutex::Mutex, queue::Queue, select::select, Either};
use crate::time::Duration;
use crate::transport::Transport;

mod receive;
mod send;
mod teach_in;


/// An error of a gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Encoding or decoding failed.
    Frame(frame::Error),
    /// Another send did not finish in time.
    SendBusyTimeout,
    /// The module did not respond in time.
    ResponseTimeout,
    /// Reading from or writing to the transport failed.
    Transport,
    /// The module answered with an error.
    ResponseNotOk(ReturnCode),
    /// The address may not be used as sender.
    InvalidSender,
    /// The address is outside of the base id range.
    InvalidBaseId,
    /// Learning mode has to last at least one second.
    InvalidLearningTimeout,
    /// The packet does not fit the transmit buffer.
    PacketTooLarge,
    /// The device registry or the parser registry is full.
    RegistryFull,
    /// The module reported no chip id.
    ChipIdUnavailable,
}

impl From<frame::Error> for Error {
    fn from(value: frame::Error) -> Self {
        Self::Frame(value)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Frame(err) => write!(f, "{err}"),
            Error::SendBusyTimeout => f.write_str("another send is in progress"),
            Error::ResponseTimeout => f.write_str("no response from the module"),
            Error::Transport => f.write_str("transport failure"),
            Error::ResponseNotOk(code) => write!(f, "module returned {code}"),
            Error::InvalidSender => f.write_str("invalid sender address"),
            Error::InvalidBaseId => f.write_str("base id out of range"),
            Error::InvalidLearningTimeout => f.write_str("learning timeout below one second"),
            Error::PacketTooLarge => f.write_str("packet does not fit the transmit buffer"),
            Error::RegistryFull => f.write_str("registry is full"),
            Error::ChipIdUnavailable => f.write_str("chip id unavailable"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// What the gateway learned about its transceiver module.
#[derive(Debug, Clone, Default)]
struct ModuleInfo {
    version: Option<VersionRepr>,
    base_id: Option<BaseIdRepr>,
}

enum LearningCommand {
    Start(Duration),
    Stop,
}

/// A teach-in query waiting for its response.
struct PendingTeachIn {
    query: UteRepr,
    request_type: UteQueryRequestType,
    sender: DeviceId,
    local_id: DeviceId,
}

/// An EnOcean gateway.
///
/// - `T` is the link to the transceiver module.
/// - `D` keeps the taught in devices.
/// - `O` receives the notifications.
/// - `TIMER` times the bounded waits.
/// - `M` is the message type the profile parsers produce.
pub struct Gateway<T, D, O, TIMER, M>
where
    T: Transport,
    D: DeviceRegistry,
    O: Observer<M>,
{
    transport: T,
    devices: RefCell<D>,
    parsers: RefCell<ParserRegistry<M>>,
    observer: O,
    timer: TIMER,
    config: GatewayConfig,

    send_lock: Mutex<()>,
    response: Channel<ResponseRepr>,

    /// The sender used for teach-in responses, set while learning.
    learning: Cell<Option<DeviceId>>,
    learning_signal: Channel<LearningCommand>,
    teach_ins: Queue<PendingTeachIn, MAX_PENDING_TEACH_INS>,

    module: RefCell<ModuleInfo>,
}

impl<T, D, O, TIMER, M> Gateway<T, D, O, TIMER, M>
where
    T: Transport,
    D: DeviceRegistry,
    O: Observer<M>,
    TIMER: DelayNs + Clone,
{
    /// Create a gateway. Nothing is read or sent before [`Gateway::run`].
    pub fn new(transport: T, devices: D, observer: O, timer: TIMER, config: GatewayConfig) -> Self {
        Self {
            transport,
            devices: RefCell::new(devices),
            parsers: RefCell::new(ParserRegistry::new()),
            observer,
            timer,
            config,
            send_lock: Mutex::new(()),
            response: Channel::new(),
            learning: Cell::new(None),
            learning_signal: Channel::new(),
            teach_ins: Queue::new(),
            module: RefCell::new(ModuleInfo::default()),
        }
    }

    /// Run the gateway. This has to be polled for the gateway to receive
    /// anything, and only returns when reading from the transport fails.
    pub async fn run(&self) -> Error {
        match select(
            self.receive_task(),
            select(self.learning_task(), self.teach_in_task()),
        )
        .await
        {
            Either::First(err) => err,
            Either::Second(Either::First(never)) => never,
            Either::Second(Either::Second(never)) => never,
        }
    }

    /// The link to the transceiver module.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The receiver of the notifications.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The run time configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Look up a device record.
    pub fn device(&self, device_id: DeviceId) -> Option<DeviceInfo> {
        self.devices.borrow().get(device_id)
    }

    /// Access the device registry.
    pub fn with_devices<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.devices.borrow_mut())
    }

    /// Register the parser for the telegrams of devices with profile `eep`.
    pub fn register_parser(&self, eep: EepId, parser: EepParser<M>) -> Result<(), Error> {
        self.parsers
            .borrow_mut()
            .register(eep, parser)
            .map_err(|_| Error::RegistryFull)
    }

    /// Returns `true` when a parser is registered for `eep`.
    pub fn has_parser(&self, eep: &EepId) -> bool {
        self.parsers.borrow().contains(eep)
    }

    /// The profiles with a registered parser, sorted.
    pub fn supported_eeps(&self) -> heapless::Vec<EepId, { crate::config::MAX_EEP_PARSERS }> {
        self.parsers.borrow().supported_eeps()
    }
}
