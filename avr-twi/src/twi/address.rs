use super::Error;

/// Direction bit appended to the 7-bit address in the SLA+R/W byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Write,
    Read,
}

impl Direction {
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Direction::Write => 0,
            Direction::Read => 1,
        }
    }
}

/// A 7-bit bus address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Address(u8);

impl core::fmt::Display for Address {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

impl Address {
    pub const MAX: u8 = 0b0111_1111;

    #[inline]
    pub const fn new(me: u8) -> Result<Self, Error> {
        if me > Self::MAX {
            Err(Error::InvalidAddress)
        } else {
            Ok(Self(me))
        }
    }

    /// Const constructor for addresses known at build time.
    ///
    /// Panics (at compile time when used in a const context) on values above
    /// `0x7f`.
    #[inline]
    pub const fn const_new(me: u8) -> Self {
        if me > Self::MAX {
            panic!("Invalid address")
        } else {
            Self(me)
        }
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn as_write_byte(&self) -> u8 {
        self.0 << 1
    }

    #[inline]
    pub const fn as_read_byte(&self) -> u8 {
        (self.0 << 1) | 1
    }

    #[inline]
    pub const fn with_direction(&self, direction: Direction) -> u8 {
        (self.0 << 1) | direction.bit()
    }
}

impl TryFrom<u8> for Address {
    type Error = Error;

    #[inline(always)]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for u8 {
    #[inline(always)]
    fn from(address: Address) -> u8 {
        address.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_eight_bit_values() {
        assert_eq!(Address::new(0x80), Err(Error::InvalidAddress));
        assert_eq!(Address::try_from(0xff), Err(Error::InvalidAddress));
        assert!(Address::new(0x7f).is_ok());
    }

    #[test]
    fn direction_bit_is_lsb() {
        let addr = Address::const_new(0x50);
        assert_eq!(addr.as_write_byte(), 0xa0);
        assert_eq!(addr.as_read_byte(), 0xa1);
        assert_eq!(addr.with_direction(Direction::Read), addr.as_read_byte());
        assert_eq!(addr.with_direction(Direction::Write), addr.as_write_byte());
        assert_eq!(u8::from(addr), 0x50);
    }
}
