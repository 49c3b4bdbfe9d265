/// Errors surfaced by the driver.
///
/// The primitive layer only ever produces [`Error::Timeout`], and only when a
/// bounded [`Wait`](super::Wait) is configured. Acknowledge failures of single
/// bytes are reported as [`Outcome`](super::Outcome) values, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// `TWINT` did not rise within the configured spin bound
    Timeout,
    /// The requested bus frequency does not fit the bit-rate register
    InvalidFrequency,
    /// Address does not fit in 7 bits
    InvalidAddress,
    /// SLA+R/W was not acknowledged
    AddressNack,
    /// A data byte was not acknowledged
    DataNack,
    /// Requested read length exceeds the output capacity
    BufferTooSmall,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Error::Timeout => "timed out waiting for TWINT",
            Error::InvalidFrequency => "bus frequency out of range for TWBR",
            Error::InvalidAddress => "address does not fit in 7 bits",
            Error::AddressNack => "address not acknowledged",
            Error::DataNack => "data byte not acknowledged",
            Error::BufferTooSmall => "buffer too small",
        })
    }
}
