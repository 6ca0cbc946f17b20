//! Binary symbols.
//!
//! This module contains the struct [Bit], which is the element of the bit
//! sequences handled by the link, and the [BitSequence] alias.

use ndarray::Array1;
use num_traits::{One, Zero};
use rand::distributions::{Distribution, Standard};
use std::fmt;

/// Bit.
///
/// This struct represents a binary symbol, whose value is either 0 or 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Bit(u8);

/// Sequence of bits.
pub type BitSequence = Array1<Bit>;

impl Zero for Bit {
    fn zero() -> Bit {
        Bit(0)
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    fn set_zero(&mut self) {
        *self = Self::zero()
    }
}

impl One for Bit {
    fn one() -> Bit {
        Bit(1)
    }

    fn set_one(&mut self) {
        *self = Self::one()
    }

    fn is_one(&self) -> bool {
        *self == Self::one()
    }
}

// Zero requires Add. Bits add modulo 2.
impl std::ops::Add for Bit {
    type Output = Bit;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Bit) -> Bit {
        Bit(self.0 ^ rhs.0)
    }
}

// One requires Mul.
impl std::ops::Mul for Bit {
    type Output = Bit;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, rhs: Bit) -> Bit {
        Bit(self.0 & rhs.0)
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Bit {
        Bit(u8::from(b))
    }
}

impl From<Bit> for u8 {
    fn from(b: Bit) -> u8 {
        b.0
    }
}

impl TryFrom<u8> for Bit {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Bit> {
        match value {
            0 | 1 => Ok(Bit(value)),
            _ => Err(crate::Error::InvalidInput("a bit must be 0 or 1")),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Distribution<Bit> for Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Bit {
        Bit::from(rng.gen::<bool>())
    }
}

/// Builds a [BitSequence] from a slice of 0/1 values.
///
/// # Examples
/// ```
/// # use psk_link::bit::bits;
/// let b = bits(&[1, 0, 1]).unwrap();
/// assert_eq!(b.len(), 3);
/// ```
pub fn bits(values: &[u8]) -> crate::Result<BitSequence> {
    values.iter().map(|&v| Bit::try_from(v)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ops() {
        assert_eq!(Bit(0) + Bit(1), Bit(1));
        assert_eq!(Bit(1) + Bit(1), Bit(0));
        assert_eq!(Bit(1) * Bit(0), Bit(0));
        assert_eq!(Bit(1) * Bit(1), Bit(1));
    }

    #[test]
    fn conversions() {
        assert_eq!(Bit::from(true), Bit::one());
        assert_eq!(u8::from(Bit::zero()), 0);
        assert_eq!(Bit::try_from(2u8), Err(crate::Error::InvalidInput("a bit must be 0 or 1")));
        assert!(bits(&[0, 1, 3]).is_err());
    }
}
