//! Bit source.
//!
//! This module generates the random bits transmitted over the link.

use crate::{bit::BitSequence, Error, Result};
use rand::{distributions::Standard, Rng};

/// Generates a sequence of `n` random bits.
///
/// Each bit is independently 0 or 1 with probability 1/2. The bits are drawn
/// from `rng`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `n` is zero.
///
/// # Examples
/// ```
/// # use psk_link::rand::*;
/// # use psk_link::simulation::source::generate_bits;
/// let mut rng = Rng::seed_from_u64(0);
/// let bits = generate_bits(&mut rng, 16).unwrap();
/// assert_eq!(bits.len(), 16);
/// ```
pub fn generate_bits<R: Rng>(rng: &mut R, n: usize) -> Result<BitSequence> {
    if n == 0 {
        return Err(Error::InvalidInput("the number of bits must be positive"));
    }
    Ok(rng.sample_iter(Standard).take(n).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rand::{Rng as ChaCha, SeedableRng};
    use num_traits::One;

    #[test]
    fn zero_bits() {
        let mut rng = ChaCha::seed_from_u64(0);
        assert!(matches!(
            generate_bits(&mut rng, 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn reproducible() {
        let a = generate_bits(&mut ChaCha::seed_from_u64(3), 1000).unwrap();
        let b = generate_bits(&mut ChaCha::seed_from_u64(3), 1000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn balanced() {
        let n = 100_000;
        let bits = generate_bits(&mut ChaCha::seed_from_u64(1), n).unwrap();
        let ones = bits.iter().filter(|b| b.is_one()).count();
        let fraction = ones as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.01);
    }
}
