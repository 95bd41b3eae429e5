use core::fmt;

/// Return code of a response packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum ReturnCode {
    /// Command executed.
    Ok,
    /// Generic error.
    Error,
    /// Command not supported.
    NotSupported,
    /// Wrong parameter.
    WrongParam,
    /// Operation denied.
    OperationDenied,
    /// Duty cycle lock.
    LockSet,
    /// Internal buffer too small.
    BufferTooSmall,
    /// No free internal buffer.
    NoFreeBuffer,
    /// Any return code this crate does not know about.
    Unknown(u8),
}

impl ReturnCode {
    /// Returns `true` for [`ReturnCode::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, ReturnCode::Ok)
    }
}

impl From<u8> for ReturnCode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Ok,
            1 => Self::Error,
            2 => Self::NotSupported,
            3 => Self::WrongParam,
            4 => Self::OperationDenied,
            5 => Self::LockSet,
            6 => Self::BufferTooSmall,
            7 => Self::NoFreeBuffer,
            value => Self::Unknown(value),
        }
    }
}

impl From<ReturnCode> for u8 {
    fn from(value: ReturnCode) -> Self {
        match value {
            ReturnCode::Ok => 0,
            ReturnCode::Error => 1,
            ReturnCode::NotSupported => 2,
            ReturnCode::WrongParam => 3,
            ReturnCode::OperationDenied => 4,
            ReturnCode::LockSet => 5,
            ReturnCode::BufferTooSmall => 6,
            ReturnCode::NoFreeBuffer => 7,
            ReturnCode::Unknown(value) => value,
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnCode::Ok => f.write_str("OK"),
            ReturnCode::Error => f.write_str("error"),
            ReturnCode::NotSupported => f.write_str("not supported"),
            ReturnCode::WrongParam => f.write_str("wrong parameter"),
            ReturnCode::OperationDenied => f.write_str("operation denied"),
            ReturnCode::LockSet => f.write_str("duty cycle lock"),
            ReturnCode::BufferTooSmall => f.write_str("buffer too small"),
            ReturnCode::NoFreeBuffer => f.write_str("no free buffer"),
            ReturnCode::Unknown(code) => write!(f, "unknown return code {code:#04x}"),
        }
    }
}
