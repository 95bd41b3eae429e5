use core::fmt;

use heapless::Vec;

use super::PacketRepr;
use crate::{
    buffer_len, DeviceId, Erp1OptionalData, Erp1Trailer, Error, Esp3Packet, PacketType, Result,
    Rorg, StatusFlags, ERP1_MIN_DATA_LEN, ERP1_OPTIONAL_DATA_LEN, MAX_USER_DATA_LEN,
};

/// User data of an ERP1 telegram, in wire order (the highest data byte first).
pub type UserData = Vec<u8, MAX_USER_DATA_LEN>;

/// A high-level representation of an ERP1 radio telegram.
///
/// User data bytes are addressed the way EEP documents number them: `DB_0`
/// is the last byte on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erp1TelegramRepr {
    /// The telegram type.
    pub rorg: Rorg,
    /// The user data.
    pub user_data: UserData,
    /// The sender address.
    pub sender: DeviceId,
    /// The status byte.
    pub status: u8,
    /// The number of sub telegrams.
    pub sub_tel_num: u8,
    /// The destination address.
    pub destination: DeviceId,
    /// The signal strength, as a positive dBm value. `0xff` when sending.
    pub dbm: u8,
    /// The security level.
    pub security_level: u8,
}

impl Default for Erp1TelegramRepr {
    fn default() -> Self {
        Self {
            rorg: Rorg::default(),
            user_data: Vec::new(),
            sender: DeviceId::GATEWAY_SELECTS_SENDER,
            status: 0,
            sub_tel_num: 3,
            destination: DeviceId::BROADCAST,
            dbm: 0xff,
            security_level: 0,
        }
    }
}

impl Erp1TelegramRepr {
    /// Create a telegram with default addressing and metadata.
    pub fn new(rorg: Rorg, user_data: &[u8]) -> Result<Self> {
        Ok(Self {
            rorg,
            user_data: Vec::from_slice(user_data).map_err(|_| Error::UserDataTooLong)?,
            ..Default::default()
        })
    }

    /// Parse an ERP1 telegram from a packet.
    pub fn parse(packet: &PacketRepr<'_>) -> Result<Self> {
        if packet.packet_type != PacketType::RadioErp1 {
            return Err(Error::WrongPacketType);
        }

        if packet.optional_data.len() != ERP1_OPTIONAL_DATA_LEN {
            return Err(Error::OptionalDataSize);
        }

        let data = packet.data;
        if data.len() < ERP1_MIN_DATA_LEN {
            return Err(Error::DataTooShort);
        }

        let user_data_end = data.len() - Erp1Trailer::<&[u8]>::size();
        let user_data =
            Vec::from_slice(&data[1..user_data_end]).map_err(|_| Error::UserDataTooLong)?;
        let trailer = Erp1Trailer::new_unchecked(&data[user_data_end..]);
        let optional = Erp1OptionalData::new_unchecked(packet.optional_data);

        Ok(Self {
            rorg: Rorg::from(data[0]),
            user_data,
            sender: DeviceId::from_u32(trailer.sender()),
            status: trailer.status(),
            sub_tel_num: optional.sub_tel_num(),
            destination: DeviceId::from_u32(optional.destination()),
            dbm: optional.dbm(),
            security_level: optional.security_level(),
        })
    }

    /// Return the number of user data bytes.
    pub fn user_data_len(&self) -> usize {
        self.user_data.len()
    }

    /// Return user data byte `DB_index`.
    pub fn db(&self, index: usize) -> Result<u8> {
        let offset = self.db_offset(index)?;
        Ok(self.user_data[offset])
    }

    /// Set user data byte `DB_index`.
    pub fn set_db(&mut self, index: usize, value: u8) -> Result<()> {
        let offset = self.db_offset(index)?;
        self.user_data[offset] = value;
        Ok(())
    }

    fn db_offset(&self, index: usize) -> Result<usize> {
        if index >= self.user_data.len() {
            return Err(Error::ByteIndexOutOfRange);
        }
        Ok(self.user_data.len() - 1 - index)
    }

    /// Return the flags of the status byte.
    pub fn status_flags(&self) -> StatusFlags {
        StatusFlags::from_status(self.status)
    }

    /// Returns `true` when the telegram is addressed to a single device.
    pub fn is_addressed(&self) -> bool {
        !self.destination.is_broadcast()
    }

    /// Return the length of the ESP3 data field.
    pub fn data_len(&self) -> usize {
        ERP1_MIN_DATA_LEN + self.user_data.len()
    }

    /// Return the length of the packet when emitted into a buffer.
    pub fn buffer_len(&self) -> usize {
        buffer_len(self.data_len(), ERP1_OPTIONAL_DATA_LEN)
    }

    /// Emit the telegram as an ESP3 packet into a buffer of at least
    /// [`Self::buffer_len`] bytes.
    pub fn emit(&self, packet: &mut Esp3Packet<&'_ mut [u8]>) {
        packet.set_sync_byte();
        packet.set_data_len(self.data_len() as u16);
        packet.set_optional_len(ERP1_OPTIONAL_DATA_LEN as u8);
        packet.set_packet_type(PacketType::RadioErp1);
        packet.fill_header_crc();

        let data = packet.data_mut();
        let user_data_end = 1 + self.user_data.len();
        data[0] = self.rorg.into();
        data[1..user_data_end].copy_from_slice(&self.user_data);
        let mut trailer = Erp1Trailer::new_unchecked(&mut data[user_data_end..]);
        trailer.set_sender(self.sender.as_u32());
        trailer.set_status(self.status);

        let mut optional = Erp1OptionalData::new_unchecked(packet.optional_data_mut());
        optional.set_sub_tel_num(self.sub_tel_num);
        optional.set_destination(self.destination.as_u32());
        optional.set_dbm(self.dbm);
        optional.set_security_level(self.security_level);

        packet.fill_data_crc();
    }
}

impl fmt::Display for Erp1TelegramRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERP1 {:?} {} -> {}:", self.rorg, self.sender, self.destination)?;
        for b in &self.user_data {
            write!(f, " {b:02x}")?;
        }
        write!(
            f,
            " status={:02x} subtel={} dbm=-{} sec={}",
            self.status, self.sub_tel_num, self.dbm, self.security_level
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Erp1TelegramRepr {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ERP1 {} {} -> {}: {=[u8]:02x} status={=u8:02x}",
            self.rorg,
            self.sender,
            self.destination,
            &self.user_data[..],
            self.status
        )
    }
}

#[cfg(feature = "fuzz")]
impl<'a> arbitrary::Arbitrary<'a> for Erp1TelegramRepr {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(0..=MAX_USER_DATA_LEN)?;
        let mut user_data = UserData::new();
        for _ in 0..len {
            user_data
                .push(u.arbitrary()?)
                .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        }

        Ok(Self {
            rorg: u.arbitrary()?,
            user_data,
            sender: u.arbitrary()?,
            status: u.arbitrary()?,
            sub_tel_num: u.arbitrary()?,
            destination: u.arbitrary()?,
            dbm: u.arbitrary()?,
            security_level: u.arbitrary()?,
        })
    }
}
