//! Register-level access to the TWI block.
//!
//! [`TwiOps`] is the only thing the driver needs from the hardware: plain
//! reads and writes of `TWCR`, `TWSR`, `TWDR`, `TWBR` and `TWAR`. The chip
//! bindings below implement it on top of the PAC.

#[cfg(feature = "hal")]
use avr_hal_generic::port;

/// `TWCR`: interrupt flag, cleared by writing a one
pub const TWINT: u8 = 1 << 7;
/// `TWCR`: enable acknowledge
pub const TWEA: u8 = 1 << 6;
/// `TWCR`: START condition
pub const TWSTA: u8 = 1 << 5;
/// `TWCR`: STOP condition
pub const TWSTO: u8 = 1 << 4;
/// `TWCR`: enable
pub const TWEN: u8 = 1 << 2;
/// `TWCR`: interrupt enable
pub const TWIE: u8 = 1 << 0;

/// `TWSR`: prescaler bits
pub const TWPS_MASK: u8 = 0b11;

/// `TWAR`: general call recognition
pub const TWGCE: u8 = 1 << 0;

pub trait TwiOps {
    /// Reads `TWCR`.
    fn control(&mut self) -> u8;

    /// Writes `TWCR`. Writing `TWINT` starts the next bus operation.
    fn set_control(&mut self, bits: u8);

    /// Reads `TWSR` (status code and prescaler bits).
    fn status(&mut self) -> u8;

    /// Writes `TWSR`. Only the prescaler bits are writable.
    fn set_status(&mut self, bits: u8);

    fn data(&mut self) -> u8;

    fn set_data(&mut self, byte: u8);

    fn set_bit_rate(&mut self, divisor: u8);

    fn set_own_address(&mut self, bits: u8);

    /// Runs between two polls of `TWCR` while waiting for `TWINT`.
    #[inline(always)]
    fn relax(&mut self) {}
}

impl<T: TwiOps + ?Sized> TwiOps for &mut T {
    #[inline(always)]
    fn control(&mut self) -> u8 {
        (**self).control()
    }

    #[inline(always)]
    fn set_control(&mut self, bits: u8) {
        (**self).set_control(bits)
    }

    #[inline(always)]
    fn status(&mut self) -> u8 {
        (**self).status()
    }

    #[inline(always)]
    fn set_status(&mut self, bits: u8) {
        (**self).set_status(bits)
    }

    #[inline(always)]
    fn data(&mut self) -> u8 {
        (**self).data()
    }

    #[inline(always)]
    fn set_data(&mut self, byte: u8) {
        (**self).set_data(byte)
    }

    #[inline(always)]
    fn set_bit_rate(&mut self, divisor: u8) {
        (**self).set_bit_rate(divisor)
    }

    #[inline(always)]
    fn set_own_address(&mut self, bits: u8) {
        (**self).set_own_address(bits)
    }

    #[inline(always)]
    fn relax(&mut self) {
        (**self).relax()
    }
}

/// Ties a TWI block to the pins it drives.
pub trait TwiPins<SDA, SCL>: TwiOps {}

#[cfg(feature = "hal")]
macro_rules! impl_twi {
    ($krate_head:ident $(:: $krate_rest:ident)*, $TWI:ident, $SDA:ident, $SCL:ident) => {
        impl_twi!(@def $TWI, $SDA, $SCL, $krate_head $(:: $krate_rest)*);
    };
    (@def $TWI:ident, $SDA:ident, $SCL:ident, $($krate:tt)+) => {
        impl $crate::twi::peripheral::TwiOps for $($krate)* ::pac::$TWI {
            #[inline(always)]
            fn control(&mut self) -> u8 {
                self.twcr.read().bits()
            }

            #[inline(always)]
            fn set_control(&mut self, bits: u8) {
                self.twcr.write(|w| unsafe { w.bits(bits) });
            }

            #[inline(always)]
            fn status(&mut self) -> u8 {
                self.twsr.read().bits()
            }

            #[inline(always)]
            fn set_status(&mut self, bits: u8) {
                self.twsr.write(|w| unsafe { w.bits(bits & $crate::twi::peripheral::TWPS_MASK) });
            }

            #[inline(always)]
            fn data(&mut self) -> u8 {
                self.twdr.read().bits()
            }

            #[inline(always)]
            fn set_data(&mut self, byte: u8) {
                self.twdr.write(|w| unsafe { w.bits(byte) });
            }

            #[inline(always)]
            fn set_bit_rate(&mut self, divisor: u8) {
                self.twbr.write(|w| unsafe { w.bits(divisor) });
            }

            #[inline(always)]
            fn set_own_address(&mut self, bits: u8) {
                self.twar.write(|w| unsafe { w.bits(bits) });
            }

            #[inline(always)]
            fn relax(&mut self) {
                avr_device::asm::nop();
            }
        }

        impl
            $crate::twi::peripheral::TwiPins<
                $($krate)* ::port::Pin<$($krate)* ::port::mode::Input, $($krate)* ::port::$SDA>,
                $($krate)* ::port::Pin<$($krate)* ::port::mode::Input, $($krate)* ::port::$SCL>,
            > for $($krate)* ::pac::$TWI
        {
        }
    };
}

/// A TWI block together with the SDA/SCL pins it owns.
pub struct TwiPeripheral<TWI, SDA, SCL> {
    p: TWI,
    #[allow(dead_code)]
    sda: SDA,
    #[allow(dead_code)]
    scl: SCL,
}

#[cfg(feature = "hal")]
impl<TWI, SDAPIN, SCLPIN>
    TwiPeripheral<TWI, port::Pin<port::mode::Input, SDAPIN>, port::Pin<port::mode::Input, SCLPIN>>
where
    TWI: TwiPins<port::Pin<port::mode::Input, SDAPIN>, port::Pin<port::mode::Input, SCLPIN>>,
    SDAPIN: port::PinOps,
    SCLPIN: port::PinOps,
{
    pub fn new(
        p: TWI,
        sda: port::Pin<port::mode::Input<port::mode::PullUp>, SDAPIN>,
        scl: port::Pin<port::mode::Input<port::mode::PullUp>, SCLPIN>,
    ) -> Self {
        Self {
            p,
            sda: sda.forget_imode(),
            scl: scl.forget_imode(),
        }
    }

    pub fn with_external_pullup(
        p: TWI,
        sda: port::Pin<port::mode::Input<port::mode::Floating>, SDAPIN>,
        scl: port::Pin<port::mode::Input<port::mode::Floating>, SCLPIN>,
    ) -> Self {
        Self {
            p,
            sda: sda.forget_imode(),
            scl: scl.forget_imode(),
        }
    }
}

impl<TWI, SDA, SCL> TwiPeripheral<TWI, SDA, SCL> {
    #[inline]
    pub fn release(self) -> (TWI, SDA, SCL) {
        (self.p, self.sda, self.scl)
    }
}

impl<TWI: TwiOps, SDA, SCL> TwiOps for TwiPeripheral<TWI, SDA, SCL> {
    #[inline(always)]
    fn control(&mut self) -> u8 {
        self.p.control()
    }

    #[inline(always)]
    fn set_control(&mut self, bits: u8) {
        self.p.set_control(bits)
    }

    #[inline(always)]
    fn status(&mut self) -> u8 {
        self.p.status()
    }

    #[inline(always)]
    fn set_status(&mut self, bits: u8) {
        self.p.set_status(bits)
    }

    #[inline(always)]
    fn data(&mut self) -> u8 {
        self.p.data()
    }

    #[inline(always)]
    fn set_data(&mut self, byte: u8) {
        self.p.set_data(byte)
    }

    #[inline(always)]
    fn set_bit_rate(&mut self, divisor: u8) {
        self.p.set_bit_rate(divisor)
    }

    #[inline(always)]
    fn set_own_address(&mut self, bits: u8) {
        self.p.set_own_address(bits)
    }

    #[inline(always)]
    fn relax(&mut self) {
        self.p.relax()
    }
}

#[cfg(any(feature = "atmega328p", feature = "atmega168", feature = "atmega48p"))]
impl_twi!(crate::hal, TWI, PC4, PC5);

#[cfg(any(
    feature = "atmega2560",
    feature = "atmega1280",
    feature = "atmega32u4"
))]
impl_twi!(crate::hal, TWI, PD1, PD0);

#[cfg(any(feature = "atmega328p", feature = "atmega168", feature = "atmega48p"))]
pub type TwiPeripheral1Sda = crate::hal::port::PC4;

#[cfg(any(feature = "atmega328p", feature = "atmega168", feature = "atmega48p"))]
pub type TwiPeripheral1Scl = crate::hal::port::PC5;

#[cfg(any(
    feature = "atmega2560",
    feature = "atmega1280",
    feature = "atmega32u4"
))]
pub type TwiPeripheral1Sda = crate::hal::port::PD1;

#[cfg(any(
    feature = "atmega2560",
    feature = "atmega1280",
    feature = "atmega32u4"
))]
pub type TwiPeripheral1Scl = crate::hal::port::PD0;

#[cfg(feature = "hal")]
pub type TwiPeripheral1Pac = crate::hal::pac::TWI;

#[cfg(feature = "hal")]
pub type TwiPeripheral1 = TwiPeripheral<
    TwiPeripheral1Pac,
    port::Pin<port::mode::Input, TwiPeripheral1Sda>,
    port::Pin<port::mode::Input, TwiPeripheral1Scl>,
>;

/// Builds a [`TwoWireInterface`](crate::twi::TwoWireInterface) on the
/// chip's TWI pins with the internal pull-ups enabled.
///
/// ```ignore
/// let mut twi = avr_twi::twi!(dp, pins, avr_twi::twi::clock::MHz16, Config::default())?;
/// ```
#[cfg(any(feature = "atmega328p", feature = "atmega168", feature = "atmega48p"))]
#[macro_export]
macro_rules! twi {
    ($peripherals:ident, $pins:ident, $clock:ty, $config:expr) => {{
        $crate::twi::TwoWireInterface::<_, $clock>::new(
            $crate::twi::peripheral::TwiPeripheral1::new(
                $peripherals.TWI,
                $pins.pc4.into_pull_up_input(),
                $pins.pc5.into_pull_up_input(),
            ),
            $config,
        )
    }};
}

#[cfg(any(feature = "atmega328p", feature = "atmega168", feature = "atmega48p"))]
#[macro_export]
macro_rules! twi_external_pullup {
    ($peripherals:ident, $pins:ident, $clock:ty, $config:expr) => {{
        $crate::twi::TwoWireInterface::<_, $clock>::new(
            $crate::twi::peripheral::TwiPeripheral1::with_external_pullup(
                $peripherals.TWI,
                $pins.pc4.into_floating_input(),
                $pins.pc5.into_floating_input(),
            ),
            $config,
        )
    }};
}

#[cfg(any(
    feature = "atmega2560",
    feature = "atmega1280",
    feature = "atmega32u4"
))]
#[macro_export]
macro_rules! twi {
    ($peripherals:ident, $pins:ident, $clock:ty, $config:expr) => {{
        $crate::twi::TwoWireInterface::<_, $clock>::new(
            $crate::twi::peripheral::TwiPeripheral1::new(
                $peripherals.TWI,
                $pins.pd1.into_pull_up_input(),
                $pins.pd0.into_pull_up_input(),
            ),
            $config,
        )
    }};
}

#[cfg(any(
    feature = "atmega2560",
    feature = "atmega1280",
    feature = "atmega32u4"
))]
#[macro_export]
macro_rules! twi_external_pullup {
    ($peripherals:ident, $pins:ident, $clock:ty, $config:expr) => {{
        $crate::twi::TwoWireInterface::<_, $clock>::new(
            $crate::twi::peripheral::TwiPeripheral1::with_external_pullup(
                $peripherals.TWI,
                $pins.pd1.into_floating_input(),
                $pins.pd0.into_floating_input(),
            ),
            $config,
        )
    }};
}
