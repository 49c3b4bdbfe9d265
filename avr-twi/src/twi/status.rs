#[cfg(feature = "hal")]
pub use avr_hal_generic::i2c::twi_status;

/// Raw `TWSR` status codes, prescaler bits already masked off.
#[cfg(not(feature = "hal"))]
pub mod twi_status {
    pub const TW_START: u8 = 0x08;
    pub const TW_REP_START: u8 = 0x10;
    pub const TW_MT_SLA_ACK: u8 = 0x18;
    pub const TW_MT_SLA_NACK: u8 = 0x20;
    pub const TW_MT_DATA_ACK: u8 = 0x28;
    pub const TW_MT_DATA_NACK: u8 = 0x30;
    pub const TW_MT_ARB_LOST: u8 = 0x38;
    pub const TW_MR_ARB_LOST: u8 = 0x38;
    pub const TW_MR_SLA_ACK: u8 = 0x40;
    pub const TW_MR_SLA_NACK: u8 = 0x48;
    pub const TW_MR_DATA_ACK: u8 = 0x50;
    pub const TW_MR_DATA_NACK: u8 = 0x58;
    pub const TW_NO_INFO: u8 = 0xf8;
    pub const TW_BUS_ERROR: u8 = 0x00;
}

/// The status codes a master write can end in, decoded from `TWSR`.
///
/// Only the four acknowledged cases get a name; everything else (NACKs,
/// arbitration loss, bus errors) is kept verbatim in [`Status::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    AddressWriteAcked,
    DataWriteAcked,
    AddressReadAcked,
    DataReadAcked,
    Other(u8),
}

impl Status {
    /// Selects the five `TWS` bits of `TWSR`.
    pub const MASK: u8 = 0xf8;

    #[inline]
    pub const fn from_register(twsr: u8) -> Self {
        match twsr & Self::MASK {
            twi_status::TW_MT_SLA_ACK => Status::AddressWriteAcked,
            twi_status::TW_MT_DATA_ACK => Status::DataWriteAcked,
            twi_status::TW_MR_SLA_ACK => Status::AddressReadAcked,
            twi_status::TW_MR_DATA_ACK => Status::DataReadAcked,
            other => Status::Other(other),
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Status::AddressWriteAcked => twi_status::TW_MT_SLA_ACK,
            Status::DataWriteAcked => twi_status::TW_MT_DATA_ACK,
            Status::AddressReadAcked => twi_status::TW_MR_SLA_ACK,
            Status::DataReadAcked => twi_status::TW_MR_DATA_ACK,
            Status::Other(code) => code,
        }
    }

    #[inline]
    pub const fn outcome(self) -> Outcome {
        match self {
            Status::Other(_) => Outcome::NotAcknowledged,
            _ => Outcome::Acknowledged,
        }
    }
}

/// Result of transmitting one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Acknowledged,
    NotAcknowledged,
}

impl Outcome {
    #[inline]
    pub const fn is_acknowledged(self) -> bool {
        matches!(self, Outcome::Acknowledged)
    }
}

impl From<Outcome> for bool {
    #[inline(always)]
    fn from(outcome: Outcome) -> bool {
        outcome.is_acknowledged()
    }
}
