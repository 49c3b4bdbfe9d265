//! Blocking master-mode driver for the AVR two-wire interface.
//!
//! The driver owns the TWI register block and walks it through the usual
//! START / SLA+R/W / data / STOP sequence, spinning on `TWINT` between steps.
//! Chip bindings are enabled with one of the `atmega*` features; without any
//! of them the crate only exposes the register-level [`twi::peripheral::TwiOps`]
//! trait and everything built on top of it.

#![no_std]

#[macro_use]
mod fmt;

pub mod twi;

pub use twi::{
    Address, Config, Direction, Error, NackPolicy, Outcome, Status, Terminator, Transaction,
    TwoWireInterface, Wait,
};

#[cfg(feature = "hal")]
pub mod reexports {
    pub mod avr_hal_generic {
        pub use avr_hal_generic::*;
    }
}

#[cfg(feature = "hal")]
pub mod hal {
    pub use atmega_hal::*;
}

#[cfg(feature = "hal")]
pub use crate::hal::pins;
#[cfg(feature = "hal")]
pub use crate::hal::Peripherals;
