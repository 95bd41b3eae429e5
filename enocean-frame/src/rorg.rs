/// Radio telegram type (RORG).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum Rorg {
    /// Repeated switch communication.
    #[default]
    Rps,
    /// 1 byte communication.
    OneBs,
    /// 4 byte communication.
    FourBs,
    /// Variable length data.
    Vld,
    /// Manufacturer specific communication.
    Msc,
    /// Addressing destination telegram.
    Adt,
    /// Smart acknowledge learn request.
    SmartAckLearnRequest,
    /// Smart acknowledge learn answer.
    SmartAckLearnAnswer,
    /// Smart acknowledge reclaim.
    SmartAckReclaim,
    /// Remote management.
    SysEx,
    /// Secure telegram.
    Sec,
    /// Secure telegram with RORG encapsulation.
    SecEncaps,
    /// Secure teach-in.
    SecMan,
    /// Signal telegram.
    Signal,
    /// Universal teach-in.
    Ute,
    /// Any RORG this crate does not know about.
    Unknown(u8),
}

impl Rorg {
    /// Returns `true` for the telegram types carrying EEP encoded data.
    pub fn is_data(&self) -> bool {
        matches!(self, Rorg::Rps | Rorg::OneBs | Rorg::FourBs | Rorg::Vld)
    }
}

impl From<u8> for Rorg {
    fn from(value: u8) -> Self {
        match value {
            0xf6 => Self::Rps,
            0xd5 => Self::OneBs,
            0xa5 => Self::FourBs,
            0xd2 => Self::Vld,
            0xd1 => Self::Msc,
            0xa6 => Self::Adt,
            0xc6 => Self::SmartAckLearnRequest,
            0xc7 => Self::SmartAckLearnAnswer,
            0xa7 => Self::SmartAckReclaim,
            0xc5 => Self::SysEx,
            0x30 => Self::Sec,
            0x31 => Self::SecEncaps,
            0x34 => Self::SecMan,
            0xd0 => Self::Signal,
            0xd4 => Self::Ute,
            value => Self::Unknown(value),
        }
    }
}

impl From<Rorg> for u8 {
    fn from(value: Rorg) -> Self {
        match value {
            Rorg::Rps => 0xf6,
            Rorg::OneBs => 0xd5,
            Rorg::FourBs => 0xa5,
            Rorg::Vld => 0xd2,
            Rorg::Msc => 0xd1,
            Rorg::Adt => 0xa6,
            Rorg::SmartAckLearnRequest => 0xc6,
            Rorg::SmartAckLearnAnswer => 0xc7,
            Rorg::SmartAckReclaim => 0xa7,
            Rorg::SysEx => 0xc5,
            Rorg::Sec => 0x30,
            Rorg::SecEncaps => 0x31,
            Rorg::SecMan => 0x34,
            Rorg::Signal => 0xd0,
            Rorg::Ute => 0xd4,
            Rorg::Unknown(value) => value,
        }
    }
}
