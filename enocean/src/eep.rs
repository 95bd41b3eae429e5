//! Profile parsers, turning data telegrams of a taught in device into
//! application messages.

use heapless::{FnvIndexMap, Vec};

use crate::config::MAX_EEP_PARSERS;
use crate::frame::{self, EepId, Erp1TelegramRepr};

/// Decodes the user data of a telegram sent by a device with a known profile.
pub type EepParser<M> = fn(&Erp1TelegramRepr) -> frame::Result<M>;

/// No parser was registered, the registry is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserRegistryFull;

/// A mapping from profile to parser. `N` must be a power of two.
pub struct ParserRegistry<M, const N: usize = MAX_EEP_PARSERS> {
    parsers: FnvIndexMap<EepId, EepParser<M>, N>,
}

impl<M, const N: usize> ParserRegistry<M, N> {
    pub fn new() -> Self {
        Self {
            parsers: FnvIndexMap::new(),
        }
    }

    /// Register the parser for `eep`, replacing a previous one.
    pub fn register(&mut self, eep: EepId, parser: EepParser<M>) -> Result<(), ParserRegistryFull> {
        self.parsers
            .insert(eep, parser)
            .map(|_| ())
            .map_err(|_| ParserRegistryFull)
    }

    pub fn get(&self, eep: &EepId) -> Option<EepParser<M>> {
        self.parsers.get(eep).copied()
    }

    pub fn contains(&self, eep: &EepId) -> bool {
        self.parsers.contains_key(eep)
    }

    /// The registered profiles, sorted.
    pub fn supported_eeps(&self) -> Vec<EepId, N> {
        let mut eeps: Vec<EepId, N> = self.parsers.keys().copied().collect();
        eeps.sort_unstable();
        eeps
    }
}

impl<M, const N: usize> Default for ParserRegistry<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
