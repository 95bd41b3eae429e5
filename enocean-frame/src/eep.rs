use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// EnOcean Equipment Profile (EEP) identifier: `RORG-FUNC-TYPE`.
///
/// The RORG takes the full byte, the function is limited to 6 bits and the
/// type to 7 bits. The canonical string form is `A5-02-05`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EepId {
    rorg: u8,
    func: u8,
    eep_type: u8,
}

impl EepId {
    /// Highest valid function.
    pub const MAX_FUNC: u8 = 0x3f;
    /// Highest valid type.
    pub const MAX_TYPE: u8 = 0x7f;

    /// Create a new EEP identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EepFieldOutOfRange`] when the function or type do not
    /// fit their bit width.
    pub fn new(rorg: u8, func: u8, eep_type: u8) -> Result<Self> {
        let mut eep = Self {
            rorg,
            func: 0,
            eep_type: 0,
        };
        eep.set_func(func)?;
        eep.set_eep_type(eep_type)?;
        Ok(eep)
    }

    /// Return the RORG.
    pub const fn rorg(&self) -> u8 {
        self.rorg
    }

    /// Return the function.
    pub const fn func(&self) -> u8 {
        self.func
    }

    /// Return the type.
    pub const fn eep_type(&self) -> u8 {
        self.eep_type
    }

    /// Set the RORG.
    pub fn set_rorg(&mut self, rorg: u8) {
        self.rorg = rorg;
    }

    /// Set the function, rejecting values above [`Self::MAX_FUNC`].
    pub fn set_func(&mut self, func: u8) -> Result<()> {
        if func > Self::MAX_FUNC {
            return Err(Error::EepFieldOutOfRange);
        }
        self.func = func;
        Ok(())
    }

    /// Set the type, rejecting values above [`Self::MAX_TYPE`].
    pub fn set_eep_type(&mut self, eep_type: u8) -> Result<()> {
        if eep_type > Self::MAX_TYPE {
            return Err(Error::EepFieldOutOfRange);
        }
        self.eep_type = eep_type;
        Ok(())
    }
}

impl TryFrom<(i64, i64, i64)> for EepId {
    type Error = Error;

    fn try_from((rorg, func, eep_type): (i64, i64, i64)) -> Result<Self> {
        let field = |value: i64| u8::try_from(value).map_err(|_| Error::EepFieldOutOfRange);
        Self::new(field(rorg)?, field(func)?, field(eep_type)?)
    }
}

impl FromStr for EepId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut fields = [0u8; 3];
        let mut parts = s.trim().split('-');

        for field in fields.iter_mut() {
            let part = parts.next().ok_or(Error::InvalidFormat)?;
            if part.is_empty() || part.len() > 2 {
                return Err(Error::InvalidFormat);
            }
            *field = u8::from_str_radix(part, 16).map_err(|_| Error::InvalidFormat)?;
        }

        if parts.next().is_some() {
            return Err(Error::InvalidFormat);
        }

        Self::new(fields[0], fields[1], fields[2])
    }
}

impl fmt::Display for EepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}-{:02X}-{:02X}",
            self.rorg, self.func, self.eep_type
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EepId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u8:02X}-{=u8:02X}-{=u8:02X}",
            self.rorg,
            self.func,
            self.eep_type
        )
    }
}

#[cfg(feature = "fuzz")]
impl<'a> arbitrary::Arbitrary<'a> for EepId {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self {
            rorg: u.arbitrary()?,
            func: u.int_in_range(0..=Self::MAX_FUNC)?,
            eep_type: u.int_in_range(0..=Self::MAX_TYPE)?,
        })
    }
}
