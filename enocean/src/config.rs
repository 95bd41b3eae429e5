//! Build time and run time configuration.
//!
//! The defaults below are generated by the build script. Each can be
//! overridden at build time by setting `ENOCEAN_<NAME>`, for example
//! `ENOCEAN_RESPONSE_TIMEOUT="Duration::from_ms(1_000)"`.
#![allow(unused)]

use crate::time::Duration;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

pub use generated::*;

/// Shortest accepted learning mode duration.
pub const MIN_LEARNING_TIMEOUT: Duration = Duration::from_secs(1);

/// Run time configuration of a [`Gateway`](crate::gateway::Gateway).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GatewayConfig {
    /// How long a send waits for a send in progress to finish.
    pub send_lock_timeout: Duration,
    /// How long a send waits for the response of the module.
    pub response_timeout: Duration,
    /// Learning mode duration used by
    /// [`Gateway::start_learning_default`](crate::gateway::Gateway::start_learning_default).
    pub default_learning_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            send_lock_timeout: SEND_LOCK_TIMEOUT,
            response_timeout: RESPONSE_TIMEOUT,
            default_learning_timeout: DEFAULT_LEARNING_TIMEOUT,
        }
    }
}
