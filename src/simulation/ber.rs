//! BER computation
//!
//! This module compares transmitted and recovered bits.

use crate::{bit::Bit, Error, Result};
use ndarray::{ArrayBase, Data, Ix1};

/// BER statistics.
///
/// This structure contains the bit error statistics of a single run of the
/// link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Number of bits compared.
    pub num_bits: u64,
    /// Number of bit errors.
    pub bit_errors: u64,
    /// Bit error rate.
    pub ber: f64,
}

impl Statistics {
    /// Computes the statistics for a transmitted and a received bit sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the sequences have different
    /// lengths, and [`Error::InvalidInput`] if they are empty.
    pub fn new<S, T>(
        transmitted: &ArrayBase<S, Ix1>,
        received: &ArrayBase<T, Ix1>,
    ) -> Result<Statistics>
    where
        S: Data<Elem = Bit>,
        T: Data<Elem = Bit>,
    {
        let bit_errors = count_bit_errors(transmitted, received)? as u64;
        if transmitted.is_empty() {
            return Err(Error::InvalidInput("cannot compute the BER of no bits"));
        }
        let num_bits = transmitted.len() as u64;
        Ok(Statistics {
            num_bits,
            bit_errors,
            ber: bit_errors as f64 / num_bits as f64,
        })
    }
}

/// Counts the positions in which two bit sequences differ.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the sequences have different lengths.
pub fn count_bit_errors<S, T>(
    transmitted: &ArrayBase<S, Ix1>,
    received: &ArrayBase<T, Ix1>,
) -> Result<usize>
where
    S: Data<Elem = Bit>,
    T: Data<Elem = Bit>,
{
    if transmitted.len() != received.len() {
        return Err(Error::LengthMismatch {
            transmitted: transmitted.len(),
            received: received.len(),
        });
    }
    Ok(transmitted
        .iter()
        .zip(received.iter())
        .filter(|(a, b)| a != b)
        .count())
}

/// Computes the bit error rate.
///
/// The result is the fraction of positions in which `transmitted` and
/// `received` differ, which is always in [0, 1].
///
/// # Examples
/// ```
/// # use psk_link::bit::bits;
/// # use psk_link::simulation::ber::compute_ber;
/// let tx = bits(&[1, 0, 1, 1]).unwrap();
/// let rx = bits(&[1, 1, 1, 1]).unwrap();
/// assert_eq!(compute_ber(&tx, &rx).unwrap(), 0.25);
/// ```
pub fn compute_ber<S, T>(
    transmitted: &ArrayBase<S, Ix1>,
    received: &ArrayBase<T, Ix1>,
) -> Result<f64>
where
    S: Data<Elem = Bit>,
    T: Data<Elem = Bit>,
{
    Statistics::new(transmitted, received).map(|stats| stats.ber)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bit::bits;
    use num_traits::One;

    #[test]
    fn identical() {
        let tx = bits(&[1, 0, 1, 1, 0, 0, 1, 0]).unwrap();
        assert_eq!(compute_ber(&tx, &tx).unwrap(), 0.0);
    }

    #[test]
    fn all_flipped() {
        let tx = bits(&[1, 0, 1, 1, 0, 0, 1, 0]).unwrap();
        let rx = tx.mapv(|b| b + Bit::one());
        assert_eq!(compute_ber(&tx, &rx).unwrap(), 1.0);
        assert_eq!(count_bit_errors(&tx, &rx).unwrap(), 8);
    }

    #[test]
    fn statistics() {
        let tx = bits(&[0, 0, 0, 0, 1]).unwrap();
        let rx = bits(&[0, 1, 0, 0, 0]).unwrap();
        let stats = Statistics::new(&tx, &rx).unwrap();
        assert_eq!(
            stats,
            Statistics {
                num_bits: 5,
                bit_errors: 2,
                ber: 0.4
            }
        );
    }

    #[test]
    fn length_mismatch() {
        let tx = bits(&[0, 1, 1]).unwrap();
        let rx = bits(&[0, 1]).unwrap();
        assert_eq!(
            compute_ber(&tx, &rx),
            Err(Error::LengthMismatch {
                transmitted: 3,
                received: 2
            })
        );
    }

    #[test]
    fn empty() {
        let tx = bits(&[]).unwrap();
        assert!(matches!(
            compute_ber(&tx, &tx),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn views() {
        let tx = bits(&[0, 1, 1, 0]).unwrap();
        let rx = bits(&[1, 1, 1, 1]).unwrap();
        let ber = compute_ber(&tx.slice(ndarray::s![..2]), &rx.view().slice(ndarray::s![..2]));
        assert_eq!(ber.unwrap(), 0.5);
    }
}
