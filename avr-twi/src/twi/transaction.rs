use super::{peripheral::TwiOps, Address, Direction, Error, Outcome, Status, TwoWireInterface};

/// An open bus transaction, from START to STOP.
///
/// Obtained from [`TwoWireInterface::start`]. Finish it with [`stop`] or,
/// to deliberately keep the bus without a STOP condition, [`abandon`].
/// Dropping an open transaction (for example when a bounded wait times out
/// and `?` returns early) issues STOP.
///
/// [`stop`]: Transaction::stop
/// [`abandon`]: Transaction::abandon
#[must_use = "dropping a transaction issues STOP immediately"]
pub struct Transaction<'a, TWI: TwiOps, CLOCK> {
    bus: &'a mut TwoWireInterface<TWI, CLOCK>,
    open: bool,
}

impl<'a, TWI: TwiOps, CLOCK> Transaction<'a, TWI, CLOCK> {
    #[inline(always)]
    pub(crate) fn new(bus: &'a mut TwoWireInterface<TWI, CLOCK>) -> Self {
        Self { bus, open: true }
    }

    /// Sends SLA+R/W for `address`.
    #[inline]
    pub fn address(&mut self, address: Address, direction: Direction) -> Result<Outcome, Error> {
        self.bus.write(address.with_direction(direction))
    }

    #[inline]
    pub fn write(&mut self, byte: u8) -> Result<Outcome, Error> {
        self.bus.write(byte)
    }

    #[inline]
    pub fn read_with_ack(&mut self) -> Result<u8, Error> {
        self.bus.read_with_ack()
    }

    #[inline]
    pub fn read_without_ack(&mut self) -> Result<u8, Error> {
        self.bus.read_without_ack()
    }

    /// Reads one byte, NACKing it when `last` is set.
    #[inline]
    pub fn read(&mut self, last: bool) -> Result<u8, Error> {
        self.bus.read(last)
    }

    /// Issues a repeated START without releasing the bus.
    #[inline]
    pub fn restart(&mut self) -> Result<(), Error> {
        self.bus.send_start()
    }

    #[inline]
    pub fn last_status(&mut self) -> Status {
        self.bus.last_status()
    }

    /// Issues STOP. Does not wait for the bus to go idle.
    #[inline]
    pub fn stop(mut self) {
        self.open = false;
        self.bus.stop();
    }

    /// Ends the transaction without a STOP condition.
    #[inline]
    pub fn abandon(mut self) {
        self.open = false;
        warn!("twi: transaction abandoned without STOP");
    }
}

impl<'a, TWI: TwiOps, CLOCK> Drop for Transaction<'a, TWI, CLOCK> {
    fn drop(&mut self) {
        if self.open {
            self.bus.stop();
        }
    }
}
