//! An EnOcean gateway engine on top of an ESP3 transceiver module.
//!
//! The [`Gateway`](gateway::Gateway) reads packets from a
//! [`Transport`](transport::Transport), dispatches radio telegrams to the
//! profile parsers of taught in devices, handles Universal Teach-In and 4BS
//! learn telegrams while learning mode is active, and serializes commands to
//! the module so that every response reaches the command that caused it.
//!
//! The engine is executor independent. [`Gateway::run`](gateway::Gateway::run)
//! has to be polled for anything to happen, usually joined or selected with
//! the application task that uses the gateway.
#![no_std]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[macro_use]
pub(crate) mod utils;

pub use enocean_frame as frame;

pub mod config;
pub mod device;
pub mod eep;
pub mod gateway;
pub mod observer;
pub mod sync;
pub mod time;
pub mod transport;
