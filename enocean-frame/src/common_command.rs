/// Common command code, the first data byte of a common command packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum CommonCommandCode {
    /// Enter energy saving mode.
    WriteSleep,
    /// Reset the device.
    WriteReset,
    /// Read the device version information.
    ReadVersion,
    /// Read the system log.
    ReadSysLog,
    /// Reset the system log.
    WriteSysLog,
    /// Perform a built-in self test.
    WriteBist,
    /// Write the base id.
    WriteIdBase,
    /// Read the base id.
    ReadIdBase,
    /// Configure the repeater.
    WriteRepeater,
    /// Read the repeater configuration.
    ReadRepeater,
    /// Add a filter.
    WriteFilterAdd,
    /// Delete a filter.
    WriteFilterDelete,
    /// Delete all filters.
    WriteFilterDeleteAll,
    /// Enable or disable the filters.
    WriteFilterEnable,
    /// Read the filters.
    ReadFilter,
    /// Wait until the end of the maturity time before sending a radio telegram.
    WriteWaitMaturity,
    /// Write to memory.
    WriteMemory,
    /// Read from memory.
    ReadMemory,
    /// Read the address and length of a configuration area.
    ReadMemoryAddress,
    /// Read the duty cycle limit.
    ReadDutyCycleLimit,
    /// Any command code this crate does not know about.
    Unknown(u8),
}

impl From<u8> for CommonCommandCode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::WriteSleep,
            2 => Self::WriteReset,
            3 => Self::ReadVersion,
            4 => Self::ReadSysLog,
            5 => Self::WriteSysLog,
            6 => Self::WriteBist,
            7 => Self::WriteIdBase,
            8 => Self::ReadIdBase,
            9 => Self::WriteRepeater,
            10 => Self::ReadRepeater,
            11 => Self::WriteFilterAdd,
            12 => Self::WriteFilterDelete,
            13 => Self::WriteFilterDeleteAll,
            14 => Self::WriteFilterEnable,
            15 => Self::ReadFilter,
            16 => Self::WriteWaitMaturity,
            18 => Self::WriteMemory,
            19 => Self::ReadMemory,
            20 => Self::ReadMemoryAddress,
            35 => Self::ReadDutyCycleLimit,
            value => Self::Unknown(value),
        }
    }
}

impl From<CommonCommandCode> for u8 {
    fn from(value: CommonCommandCode) -> Self {
        match value {
            CommonCommandCode::WriteSleep => 1,
            CommonCommandCode::WriteReset => 2,
            CommonCommandCode::ReadVersion => 3,
            CommonCommandCode::ReadSysLog => 4,
            CommonCommandCode::WriteSysLog => 5,
            CommonCommandCode::WriteBist => 6,
            CommonCommandCode::WriteIdBase => 7,
            CommonCommandCode::ReadIdBase => 8,
            CommonCommandCode::WriteRepeater => 9,
            CommonCommandCode::ReadRepeater => 10,
            CommonCommandCode::WriteFilterAdd => 11,
            CommonCommandCode::WriteFilterDelete => 12,
            CommonCommandCode::WriteFilterDeleteAll => 13,
            CommonCommandCode::WriteFilterEnable => 14,
            CommonCommandCode::ReadFilter => 15,
            CommonCommandCode::WriteWaitMaturity => 16,
            CommonCommandCode::WriteMemory => 18,
            CommonCommandCode::ReadMemory => 19,
            CommonCommandCode::ReadMemoryAddress => 20,
            CommonCommandCode::ReadDutyCycleLimit => 35,
            CommonCommandCode::Unknown(value) => value,
        }
    }
}
