mod address;
pub mod clock;
mod config;
mod error;
pub mod peripheral;
#[cfg(test)]
mod sim;
mod status;
mod transaction;
mod wait;

use core::{ffi::CStr, marker::PhantomData};

pub use address::Address;
pub use address::Direction;
pub use clock::Clock;
pub use config::{Config, NackPolicy, Terminator};
pub use error::Error;
use peripheral::{TwiOps, TWEA, TWEN, TWGCE, TWINT, TWSTA, TWSTO};
pub use status::{twi_status, Outcome, Status};
pub use transaction::Transaction;
pub use wait::Wait;

/// Master-mode driver owning one TWI block.
///
/// Every bus operation takes `&mut self`, so a single owner drives the bus at
/// a time. Sharing it between contexts needs an external lock.
pub struct TwoWireInterface<TWI: TwiOps, CLOCK> {
    twi: TWI,
    config: Config,
    _clock: PhantomData<CLOCK>,
}

impl<TWI: TwiOps, CLOCK: Clock> TwoWireInterface<TWI, CLOCK> {
    /// Programs the prescaler and bit rate for `config.frequency_khz` and
    /// enables the block.
    ///
    /// Fails with [`Error::InvalidFrequency`] when the divisor would be
    /// negative or larger than `TWBR` can hold.
    pub fn new(twi: TWI, config: Config) -> Result<Self, Error> {
        let divisor = clock::checked_bit_rate_divisor(CLOCK::FREQ, config.frequency_khz)?;
        Ok(Self::init(twi, config, divisor))
    }

    /// Like [`new`](Self::new) but writes whatever the divisor formula
    /// produces, wrapped and truncated to eight bits.
    pub fn new_unchecked(twi: TWI, config: Config) -> Self {
        let divisor = clock::bit_rate_divisor(CLOCK::FREQ, config.frequency_khz);
        Self::init(twi, config, divisor)
    }

    /// Reprograms `TWBR`. Must not be called inside a transaction.
    pub fn set_frequency(&mut self, frequency_khz: u16) -> Result<(), Error> {
        let divisor = clock::checked_bit_rate_divisor(CLOCK::FREQ, frequency_khz)?;
        self.twi.set_bit_rate(divisor);
        self.config.frequency_khz = frequency_khz;
        Ok(())
    }

    fn init(mut twi: TWI, config: Config, divisor: u8) -> Self {
        // Prescaler 1
        twi.set_status(0);
        twi.set_bit_rate(divisor);
        twi.set_control(TWEN);
        debug!(
            "twi: {=u16} kHz, TWBR = {=u8}",
            config.frequency_khz,
            divisor
        );

        Self {
            twi,
            config,
            _clock: PhantomData,
        }
    }
}

impl<TWI: TwiOps, CLOCK> TwoWireInterface<TWI, CLOCK> {
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn set_wait(&mut self, wait: Wait) {
        self.config.wait = wait;
    }

    #[inline]
    pub fn set_terminator(&mut self, terminator: Terminator) {
        self.config.terminator = terminator;
    }

    #[inline]
    pub fn set_nack_policy(&mut self, nack_policy: NackPolicy) {
        self.config.nack_policy = nack_policy;
    }

    /// Disables the block and hands the registers back.
    pub fn release(mut self) -> TWI {
        self.twi.set_control(0);
        self.twi
    }

    /// Decoded `TWSR` as left by the last operation.
    #[inline]
    pub fn last_status(&mut self) -> Status {
        Status::from_register(self.twi.status())
    }

    fn wait_for_twint(&mut self) -> Result<(), Error> {
        let wait = self.config.wait;
        let twi = &mut self.twi;
        let ready = wait.spin(|| {
            if twi.control() & TWINT != 0 {
                true
            } else {
                twi.relax();
                false
            }
        });

        if ready {
            Ok(())
        } else {
            warn!("twi: timed out waiting for TWINT");
            Err(Error::Timeout)
        }
    }

    // ----- primitives -----

    /// Sends START and opens a [`Transaction`].
    ///
    /// With [`Wait::Unbounded`] this never returns if the bus is stuck.
    pub fn start(&mut self) -> Result<Transaction<'_, TWI, CLOCK>, Error> {
        self.send_start()?;
        Ok(Transaction::new(self))
    }

    /// Sends a (repeated) START and waits for it to complete, without a
    /// guard. The caller is responsible for the matching [`stop`](Self::stop).
    pub fn send_start(&mut self) -> Result<(), Error> {
        trace!("twi: START");
        self.twi.set_control(TWINT | TWSTA | TWEN);
        self.wait_for_twint()
    }

    /// Requests STOP and returns immediately.
    ///
    /// The STOP condition is still being generated when this returns; the
    /// bus is not guaranteed idle yet.
    pub fn stop(&mut self) {
        trace!("twi: STOP");
        self.twi.set_control(TWINT | TWSTO | TWEN);
    }

    /// Transmits one byte (SLA+R/W or data) inside a transaction.
    ///
    /// Acknowledged only for the four ACK status codes; NACKs, arbitration
    /// loss and bus errors all map to [`Outcome::NotAcknowledged`].
    pub fn write(&mut self, byte: u8) -> Result<Outcome, Error> {
        self.twi.set_data(byte);
        self.twi.set_control(TWINT | TWEN);
        self.wait_for_twint()?;

        let status = self.last_status();
        trace!("twi: sent {=u8:#x}, status {=u8:#x}", byte, status.code());
        Ok(status.outcome())
    }

    /// Receives one byte and ACKs it, asking the target for more.
    pub fn read_with_ack(&mut self) -> Result<u8, Error> {
        self.twi.set_control(TWINT | TWEN | TWEA);
        self.wait_for_twint()?;
        Ok(self.twi.data())
    }

    /// Receives one byte and NACKs it, telling the target to stop sending.
    pub fn read_without_ack(&mut self) -> Result<u8, Error> {
        self.twi.set_control(TWINT | TWEN);
        self.wait_for_twint()?;
        Ok(self.twi.data())
    }

    #[inline]
    pub fn read(&mut self, last: bool) -> Result<u8, Error> {
        if last {
            self.read_without_ack()
        } else {
            self.read_with_ack()
        }
    }

    // ----- single byte transactions -----

    /// START, SLA+W, `data`, STOP.
    ///
    /// Acknowledge results are not inspected: a missing target still gets the
    /// data byte and the STOP. Only a timeout is reported. Use
    /// [`write_byte_checked`](Self::write_byte_checked) to learn about NACKs.
    pub fn write_byte(&mut self, address: Address, data: u8) -> Result<(), Error> {
        let mut tx = self.start()?;
        tx.address(address, Direction::Write)?;
        tx.write(data)?;
        tx.stop();
        Ok(())
    }

    /// START, SLA+W, `data`, STOP, reporting which byte was not acknowledged.
    ///
    /// STOP is issued on every path.
    pub fn write_byte_checked(&mut self, address: Address, data: u8) -> Result<(), Error> {
        let mut tx = self.start()?;
        if !tx.address(address, Direction::Write)?.is_acknowledged() {
            tx.stop();
            return Err(Error::AddressNack);
        }
        if !tx.write(data)?.is_acknowledged() {
            tx.stop();
            return Err(Error::DataNack);
        }
        tx.stop();
        Ok(())
    }

    /// START, SLA+R, one NACKed read, STOP.
    ///
    /// Returns whatever is in `TWDR`, even when the address was not
    /// acknowledged.
    pub fn read_byte(&mut self, address: Address) -> Result<u8, Error> {
        let mut tx = self.start()?;
        tx.address(address, Direction::Read)?;
        let data = tx.read_without_ack()?;
        tx.stop();
        Ok(data)
    }

    // ----- page transfers -----

    /// Writes `bytes` to `address` in one transaction.
    ///
    /// The address phase result is ignored. Data bytes stop at the first one
    /// the target does not acknowledge, and `NotAcknowledged` is returned;
    /// under [`NackPolicy::LeaveOpen`] no STOP is sent on that path.
    pub fn page_write(&mut self, address: Address, bytes: &[u8]) -> Result<Outcome, Error> {
        let policy = self.config.nack_policy;
        let mut tx = self.start()?;
        tx.address(address, Direction::Write)?;

        for (idx, &byte) in bytes.iter().enumerate() {
            if !tx.write(byte)?.is_acknowledged() {
                debug!("twi: {} NACKed byte {=usize}", address.get(), idx);
                match policy {
                    NackPolicy::LeaveOpen => tx.abandon(),
                    NackPolicy::Stop => tx.stop(),
                }
                return Ok(Outcome::NotAcknowledged);
            }
        }

        tx.stop();
        Ok(Outcome::Acknowledged)
    }

    /// Writes the bytes of `text`, without its NUL, as a page.
    #[inline]
    pub fn page_write_cstr(&mut self, address: Address, text: &CStr) -> Result<Outcome, Error> {
        self.page_write(address, text.to_bytes())
    }

    /// Fills `buffer` from `address` in one transaction, ACKing every byte
    /// but the last.
    ///
    /// With [`Terminator::Nul`] the last slot of a non-empty buffer is then
    /// overwritten with `0`; the final received byte is discarded.
    pub fn page_read(&mut self, address: Address, buffer: &mut [u8]) -> Result<(), Error> {
        let terminator = self.config.terminator;
        let mut tx = self.start()?;
        tx.address(address, Direction::Read)?;

        let last = buffer.len().saturating_sub(1);
        for (idx, slot) in buffer.iter_mut().enumerate() {
            *slot = tx.read(idx == last)?;
        }

        if let (Terminator::Nul, Some(end)) = (terminator, buffer.last_mut()) {
            *end = 0;
        }

        tx.stop();
        Ok(())
    }

    /// [`page_read`](Self::page_read) into an owned buffer of `len` bytes.
    pub fn page_read_vec<const N: usize>(
        &mut self,
        address: Address,
        len: usize,
    ) -> Result<heapless::Vec<u8, N>, Error> {
        let mut buffer = heapless::Vec::new();
        buffer
            .resize(len, 0)
            .map_err(|_| Error::BufferTooSmall)?;
        self.page_read(address, &mut buffer)?;
        Ok(buffer)
    }

    // ----- target mode -----

    /// Makes the block answer to `address` as a target and enables
    /// acknowledge generation.
    pub fn set_local_address(&mut self, address: Address) {
        self.twi.set_own_address(address.as_write_byte());
        self.twi.set_control(TWEN | TWEA);
    }

    /// Like [`set_local_address`](Self::set_local_address), additionally
    /// answering the general call address `0x00`.
    pub fn set_local_address_general_call(&mut self, address: Address) {
        self.twi.set_own_address(address.as_write_byte() | TWGCE);
        self.twi.set_control(TWEN | TWEA);
    }
}
