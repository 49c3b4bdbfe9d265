//! Simulated TWI block for host tests.
//!
//! Models one target on the bus: START moves to the address phase, the
//! SLA+R/W byte selects transmit or receive, every `TWINT` write completes
//! immediately with the status code the hardware would report.

use heapless::Vec;

use super::{
    peripheral::{TwiOps, TWEA, TWINT, TWPS_MASK, TWSTA, TWSTO},
    status::twi_status::*,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Start,
    Stop,
    Sent(u8),
    Received { byte: u8, ack: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Started,
    Transmitting,
    Receiving,
}

pub(crate) struct SimTwi {
    pub twcr: u8,
    pub twsr: u8,
    pub twdr: u8,
    pub twbr: u8,
    pub twar: u8,
    pub events: Vec<Event, 64>,
    pub control_writes: Vec<u8, 128>,
    /// Bytes the target hands out, in order. Exhausted reads yield `0xff`.
    pub rx: Vec<u8, 64>,
    rx_pos: usize,
    /// NACK the SLA byte.
    pub nack_address: bool,
    /// NACK the data byte with this index and every one after it.
    pub nack_data_at: Option<usize>,
    /// Report this status after the next completed operation.
    pub forced_status: Option<u8>,
    /// Never raise `TWINT`.
    pub stuck: bool,
    /// Raise `TWINT` for this many operations, then get stuck.
    pub stuck_after: Option<usize>,
    /// Append transmitted data bytes to `rx`.
    pub echo: bool,
    pub polls: u32,
    pub relaxed: u32,
    phase: Phase,
    data_sent: usize,
    completed: usize,
}

impl SimTwi {
    pub fn new() -> Self {
        Self {
            twcr: 0,
            twsr: TW_NO_INFO,
            twdr: 0,
            twbr: 0,
            twar: 0,
            events: Vec::new(),
            control_writes: Vec::new(),
            rx: Vec::new(),
            rx_pos: 0,
            nack_address: false,
            nack_data_at: None,
            forced_status: None,
            stuck: false,
            stuck_after: None,
            echo: false,
            polls: 0,
            relaxed: 0,
            phase: Phase::Idle,
            data_sent: 0,
            completed: 0,
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.rx.extend_from_slice(bytes).unwrap();
    }

    fn is_stuck(&self) -> bool {
        self.stuck || self.stuck_after.map_or(false, |n| self.completed >= n)
    }

    fn transmit(&mut self) -> u8 {
        let byte = self.twdr;
        self.events.push(Event::Sent(byte)).unwrap();

        match self.phase {
            Phase::Started => {
                let read = byte & 1 == 1;
                self.phase = if read {
                    Phase::Receiving
                } else {
                    Phase::Transmitting
                };
                self.data_sent = 0;
                match (read, self.nack_address) {
                    (false, false) => TW_MT_SLA_ACK,
                    (false, true) => TW_MT_SLA_NACK,
                    (true, false) => TW_MR_SLA_ACK,
                    (true, true) => TW_MR_SLA_NACK,
                }
            }
            Phase::Transmitting => {
                if self.echo {
                    self.rx.push(byte).unwrap();
                }
                let idx = self.data_sent;
                self.data_sent += 1;
                if self.nack_data_at.map_or(false, |n| idx >= n) {
                    TW_MT_DATA_NACK
                } else {
                    TW_MT_DATA_ACK
                }
            }
            Phase::Idle | Phase::Receiving => TW_BUS_ERROR,
        }
    }

    fn receive(&mut self, ack: bool) -> u8 {
        let byte = self.rx.get(self.rx_pos).copied().unwrap_or(0xff);
        self.rx_pos += 1;
        self.twdr = byte;
        self.events.push(Event::Received { byte, ack }).unwrap();
        if ack {
            TW_MR_DATA_ACK
        } else {
            TW_MR_DATA_NACK
        }
    }
}

impl TwiOps for SimTwi {
    fn control(&mut self) -> u8 {
        self.polls += 1;
        self.twcr
    }

    fn set_control(&mut self, bits: u8) {
        self.control_writes.push(bits).unwrap();
        self.twcr = bits & !TWINT;

        if bits & TWINT == 0 {
            return;
        }

        if bits & TWSTO != 0 {
            self.events.push(Event::Stop).unwrap();
            self.phase = Phase::Idle;
            self.twcr &= !TWSTO;
            self.twsr = TW_NO_INFO | (self.twsr & TWPS_MASK);
            return;
        }

        if self.is_stuck() {
            return;
        }

        let status = if bits & TWSTA != 0 {
            let status = if self.phase == Phase::Idle {
                TW_START
            } else {
                TW_REP_START
            };
            self.events.push(Event::Start).unwrap();
            self.phase = Phase::Started;
            status
        } else if self.phase == Phase::Receiving {
            self.receive(bits & TWEA != 0)
        } else {
            self.transmit()
        };

        let status = self.forced_status.take().unwrap_or(status);
        self.twsr = status | (self.twsr & TWPS_MASK);
        self.twcr |= TWINT;
        self.completed += 1;
    }

    fn status(&mut self) -> u8 {
        self.twsr
    }

    fn set_status(&mut self, bits: u8) {
        self.twsr = (self.twsr & !TWPS_MASK) | (bits & TWPS_MASK);
    }

    fn data(&mut self) -> u8 {
        self.twdr
    }

    fn set_data(&mut self, byte: u8) {
        self.twdr = byte;
    }

    fn set_bit_rate(&mut self, divisor: u8) {
        self.twbr = divisor;
    }

    fn set_own_address(&mut self, bits: u8) {
        self.twar = bits;
    }

    fn relax(&mut self) {
        self.relaxed += 1;
    }
}
