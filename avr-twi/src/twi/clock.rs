use super::Error;

#[cfg(feature = "hal")]
pub use avr_hal_generic::clock::{Clock, MHz1, MHz12, MHz16, MHz20, MHz24, MHz8};

/// CPU clock the bit-rate divisor is derived from.
#[cfg(not(feature = "hal"))]
pub trait Clock {
    const FREQ: u32;
}

#[cfg(not(feature = "hal"))]
macro_rules! impl_clock {
    ($($name:ident => $freq:expr),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Clock for $name {
                const FREQ: u32 = $freq;
            }
        )*
    };
}

#[cfg(not(feature = "hal"))]
impl_clock! {
    MHz1 => 1_000_000,
    MHz8 => 8_000_000,
    MHz12 => 12_000_000,
    MHz16 => 16_000_000,
    MHz20 => 20_000_000,
    MHz24 => 24_000_000,
}

// SCL = F_CPU / (16 + 2 * TWBR * 4^TWPS), with TWPS fixed to 0.
#[inline]
fn quotient(cpu_hz: u32, frequency_khz: u16) -> Option<u32> {
    let bus_hz = u32::from(frequency_khz).checked_mul(1000)?;
    cpu_hz.checked_div(bus_hz)
}

/// `TWBR` value for `frequency_khz`, computed exactly like the hardware
/// formula with no range checking.
///
/// Frequencies too high for the CPU clock wrap around and anything above 255
/// is truncated to the register width. A frequency of 0 yields 0.
#[inline]
pub fn bit_rate_divisor(cpu_hz: u32, frequency_khz: u16) -> u8 {
    let q = quotient(cpu_hz, frequency_khz).unwrap_or(16);
    (q.wrapping_sub(16) / 2) as u8
}

/// Like [`bit_rate_divisor`] but refuses frequencies whose divisor is
/// negative or does not fit in `TWBR`.
pub fn checked_bit_rate_divisor(cpu_hz: u32, frequency_khz: u16) -> Result<u8, Error> {
    let q = quotient(cpu_hz, frequency_khz).ok_or(Error::InvalidFrequency)?;
    let divisor = q.checked_sub(16).ok_or(Error::InvalidFrequency)? / 2;
    u8::try_from(divisor).map_err(|_| Error::InvalidFrequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rates_at_16mhz() {
        assert_eq!(checked_bit_rate_divisor(MHz16::FREQ, 100), Ok(72));
        assert_eq!(checked_bit_rate_divisor(MHz16::FREQ, 400), Ok(12));
        assert_eq!(checked_bit_rate_divisor(MHz8::FREQ, 100), Ok(32));
    }

    #[test]
    fn divisor_matches_formula_wherever_non_negative() {
        for f in 1..=1000u16 {
            let q = MHz16::FREQ / (u32::from(f) * 1000);
            if q < 16 {
                continue;
            }
            let expected = (q - 16) / 2;
            assert_eq!(u32::from(bit_rate_divisor(MHz16::FREQ, f)), expected & 0xff);
            match checked_bit_rate_divisor(MHz16::FREQ, f) {
                Ok(divisor) => assert_eq!(u32::from(divisor), expected),
                Err(err) => {
                    assert_eq!(err, Error::InvalidFrequency);
                    assert!(expected > 255, "f = {}", f);
                }
            }
        }
    }

    #[cfg(feature = "hal")]
    #[test]
    fn hal_clock_types_drive_the_divisor() {
        fn divisor<C: Clock>() -> Result<u8, Error> {
            checked_bit_rate_divisor(C::FREQ, 100)
        }
        assert_eq!(divisor::<avr_hal_generic::clock::MHz16>(), Ok(72));
    }

    #[test]
    fn out_of_range_frequencies() {
        // 8 MHz / 16 = 500 kHz is the highest rate with TWBR = 0
        assert_eq!(checked_bit_rate_divisor(MHz8::FREQ, 500), Ok(0));
        assert_eq!(
            checked_bit_rate_divisor(MHz8::FREQ, 1000),
            Err(Error::InvalidFrequency)
        );
        assert_eq!(
            checked_bit_rate_divisor(MHz16::FREQ, 0),
            Err(Error::InvalidFrequency)
        );
        // 20 MHz at 10 kHz needs TWBR = 992
        assert_eq!(
            checked_bit_rate_divisor(MHz20::FREQ, 10),
            Err(Error::InvalidFrequency)
        );
        assert_eq!(bit_rate_divisor(MHz20::FREQ, 10), (992u32 & 0xff) as u8);
        // unchecked path silently wraps
        assert_eq!(bit_rate_divisor(MHz8::FREQ, 1000), ((8u32.wrapping_sub(16)) / 2) as u8);
    }
}
