//! Modulation and demodulation.
//!
//! This module implements routines for modulation of bits to complex baseband
//! symbols and hard-decision demodulation of symbols back to bits.

use crate::{
    bit::{Bit, BitSequence},
    Error, Result,
};
use clap::ValueEnum;
use enum_iterator::Sequence;
use ndarray::{ArrayBase, Data, Ix1};
use num_complex::Complex;
use num_traits::{One, Zero};

/// PSK modulation.
///
/// This trait is used to define the modulations that can be handled by the
/// link. It ties together a modulator and demodulator that use the same
/// constellation, and declares the number of bits per symbol of the
/// modulation.
pub trait PskModulation: 'static {
    /// Modulator type.
    type Modulator: Modulator;
    /// Demodulator type.
    type Demodulator: Demodulator;
    /// Number of bits per symbol.
    const BITS_PER_SYMBOL: usize;
    /// Constellation.
    ///
    /// The symbol at index `k` is the one used for the bit pattern whose value
    /// is `k`, taking the first transmitted bit as the most significant.
    const CONSTELLATION: &'static [Complex<f64>];

    /// Returns the average energy of the constellation symbols.
    fn symbol_energy() -> f64 {
        Self::CONSTELLATION.iter().map(|s| s.norm_sqr()).sum::<f64>()
            / Self::CONSTELLATION.len() as f64
    }
}

/// Modulator.
///
/// This trait defines modulators, which can convert a sequence of bits into
/// symbols.
pub trait Modulator: Default + Clone + Send {
    /// Modulates a sequence of bits into symbols.
    fn modulate<S>(&self, bits: &ArrayBase<S, Ix1>) -> Result<Vec<Complex<f64>>>
    where
        S: Data<Elem = Bit>;
}

/// Demodulator.
///
/// This trait defines demodulators, which make a hard decision on the bits
/// carried by each symbol.
pub trait Demodulator: Default + Clone + Send {
    /// Returns the bits corresponding to a sequence of symbols.
    fn demodulate(&self, symbols: &[Complex<f64>]) -> BitSequence;
}

/// BPSK modulation
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Bpsk {}

impl PskModulation for Bpsk {
    type Modulator = BpskModulator;
    type Demodulator = BpskDemodulator;
    const BITS_PER_SYMBOL: usize = 1;
    const CONSTELLATION: &'static [Complex<f64>] =
        &[Complex::new(-1.0, 0.0), Complex::new(1.0, 0.0)];
}

/// BPSK modulator.
///
/// Maps the bit 0 to the symbol -1.0 and the bit 1 to the symbol +1.0.
#[derive(Debug, Clone, Default)]
pub struct BpskModulator {}

impl BpskModulator {
    /// Creates a new BPSK modulator.
    pub fn new() -> BpskModulator {
        BpskModulator::default()
    }

    fn modulate_bit(bit: Bit) -> Complex<f64> {
        Bpsk::CONSTELLATION[usize::from(u8::from(bit))]
    }
}

impl Modulator for BpskModulator {
    fn modulate<S>(&self, bits: &ArrayBase<S, Ix1>) -> Result<Vec<Complex<f64>>>
    where
        S: Data<Elem = Bit>,
    {
        Ok(bits.iter().cloned().map(Self::modulate_bit).collect())
    }
}

/// BPSK demodulator.
///
/// Assumes the same mapping as the [BpskModulator]. A symbol with a positive
/// real part is decided as a 1, and any other symbol as a 0.
#[derive(Debug, Clone, Default)]
pub struct BpskDemodulator {}

impl BpskDemodulator {
    /// Creates a new BPSK demodulator.
    pub fn new() -> BpskDemodulator {
        BpskDemodulator::default()
    }
}

impl Demodulator for BpskDemodulator {
    fn demodulate(&self, symbols: &[Complex<f64>]) -> BitSequence {
        symbols.iter().map(|x| Bit::from(x.re > 0.0)).collect()
    }
}

/// QPSK modulation
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Qpsk {}

impl PskModulation for Qpsk {
    type Modulator = QpskModulator;
    type Demodulator = QpskDemodulator;
    const BITS_PER_SYMBOL: usize = 2;
    const CONSTELLATION: &'static [Complex<f64>] = &[
        Complex::new(1.0, 1.0),
        Complex::new(-1.0, 1.0),
        Complex::new(-1.0, -1.0),
        Complex::new(1.0, -1.0),
    ];
}

/// QPSK modulator.
///
/// QPSK modulator using a fixed quadrant map with unnormalized amplitude
/// (each symbol has energy 2). The map is not Gray-coded: the pairs 01 and 10
/// are neighbours. The pairs 00, 01, 10, 11 are mapped to 1+1j, -1+1j, -1-1j,
/// 1-1j respectively. The modulator can only work with sequences whose length
/// is a multiple of 2 bits.
#[derive(Debug, Clone, Default)]
pub struct QpskModulator {}

impl QpskModulator {
    /// Creates a new QPSK modulator.
    pub fn new() -> QpskModulator {
        QpskModulator::default()
    }

    fn modulate_bits(b0: Bit, b1: Bit) -> Complex<f64> {
        let index = 2 * usize::from(u8::from(b0)) + usize::from(u8::from(b1));
        Qpsk::CONSTELLATION[index]
    }
}

impl Modulator for QpskModulator {
    /// Modulates a sequence of bits into symbols.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the length of the sequence is odd.
    fn modulate<S>(&self, bits: &ArrayBase<S, Ix1>) -> Result<Vec<Complex<f64>>>
    where
        S: Data<Elem = Bit>,
    {
        if bits.len() % 2 != 0 {
            return Err(Error::InvalidInput(
                "QPSK needs an even number of bits",
            ));
        }
        Ok(bits
            .iter()
            .step_by(2)
            .zip(bits.iter().skip(1).step_by(2))
            .map(|(&b0, &b1)| Self::modulate_bits(b0, b1))
            .collect())
    }
}

/// QPSK demodulator.
///
/// Assumes the same mapping as the [QpskModulator]. The decision is done by
/// quadrant, with a zero real or imaginary part taken as non-positive.
#[derive(Debug, Clone, Default)]
pub struct QpskDemodulator {}

impl QpskDemodulator {
    /// Creates a new QPSK demodulator.
    pub fn new() -> QpskDemodulator {
        QpskDemodulator::default()
    }

    fn demodulate_symbol(symbol: Complex<f64>) -> [Bit; 2] {
        let (z, o) = (Bit::zero(), Bit::one());
        match (symbol.re > 0.0, symbol.im > 0.0) {
            (true, true) => [z, z],
            (false, true) => [z, o],
            (false, false) => [o, z],
            (true, false) => [o, o],
        }
    }
}

impl Demodulator for QpskDemodulator {
    fn demodulate(&self, symbols: &[Complex<f64>]) -> BitSequence {
        symbols
            .iter()
            .flat_map(|&x| Self::demodulate_symbol(x))
            .collect()
    }
}

/// Modulation.
///
/// This enum represents the modulations that can be simulated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, ValueEnum, Sequence)]
#[clap(rename_all = "UPPER")]
pub enum Modulation {
    /// BPSK modulation.
    Bpsk,
    /// QPSK modulation.
    Qpsk,
}

macro_rules! impl_match {
    ($self:expr, $m:ident => $e:expr) => {
        match $self {
            Modulation::Bpsk => {
                type $m = Bpsk;
                $e
            }
            Modulation::Qpsk => {
                type $m = Qpsk;
                $e
            }
        }
    };
}

impl Modulation {
    /// Returns the number of bits carried by each symbol.
    pub fn bits_per_symbol(&self) -> usize {
        impl_match!(self, M => M::BITS_PER_SYMBOL)
    }

    /// Returns the average symbol energy of the constellation.
    pub fn symbol_energy(&self) -> f64 {
        impl_match!(self, M => M::symbol_energy())
    }

    /// Returns the constellation points.
    ///
    /// The point at index `k` is the one used for the bit pattern with value
    /// `k`.
    pub fn constellation(&self) -> &'static [Complex<f64>] {
        impl_match!(self, M => M::CONSTELLATION)
    }

    /// Modulates a sequence of bits into symbols.
    pub fn modulate<S>(&self, bits: &ArrayBase<S, Ix1>) -> Result<Vec<Complex<f64>>>
    where
        S: Data<Elem = Bit>,
    {
        impl_match!(self, M => <M as PskModulation>::Modulator::default().modulate(bits))
    }

    /// Demodulates a sequence of symbols into bits.
    pub fn demodulate(&self, symbols: &[Complex<f64>]) -> BitSequence {
        impl_match!(self, M => <M as PskModulation>::Demodulator::default().demodulate(symbols))
    }
}

impl std::str::FromStr for Modulation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Modulation, String> {
        Ok(match s {
            "BPSK" => Modulation::Bpsk,
            "QPSK" => Modulation::Qpsk,
            _ => Err(format!("invalid modulation {s}"))?,
        })
    }
}

impl std::fmt::Display for Modulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                Modulation::Bpsk => "BPSK",
                Modulation::Qpsk => "QPSK",
            }
        )
    }
}

/// Modulates a sequence of bits with the given modulation.
///
/// # Examples
/// ```
/// # use psk_link::bit::bits;
/// # use psk_link::simulation::modulation::{modulate, Modulation};
/// # use num_complex::Complex;
/// let symbols = modulate(&bits(&[1, 0]).unwrap(), Modulation::Bpsk).unwrap();
/// assert_eq!(symbols, vec![Complex::new(1.0, 0.0), Complex::new(-1.0, 0.0)]);
/// ```
pub fn modulate<S>(bits: &ArrayBase<S, Ix1>, modulation: Modulation) -> Result<Vec<Complex<f64>>>
where
    S: Data<Elem = Bit>,
{
    modulation.modulate(bits)
}

/// Demodulates a sequence of symbols with the given modulation.
pub fn demodulate(symbols: &[Complex<f64>], modulation: Modulation) -> BitSequence {
    modulation.demodulate(symbols)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{bit::bits, rand::*, simulation::source::generate_bits};

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn bpsk_modulator() {
        let modulator = BpskModulator::new();
        let x = modulator
            .modulate(&bits(&[1, 0, 1, 1, 0, 0, 1, 0]).unwrap())
            .unwrap();
        let expected = [1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0]
            .into_iter()
            .map(|re| c(re, 0.0))
            .collect::<Vec<_>>();
        assert_eq!(x, expected);
    }

    #[test]
    fn bpsk_demodulator() {
        let demodulator = BpskDemodulator::new();
        let x = demodulator.demodulate(&[c(0.3, -2.0), c(-0.1, 5.0), c(0.0, 1.0)]);
        assert_eq!(x, bits(&[1, 0, 0]).unwrap());
    }

    #[test]
    fn qpsk_modulator() {
        let modulator = QpskModulator::new();
        let x = modulator
            .modulate(&bits(&[0, 0, 0, 1, 1, 0, 1, 1]).unwrap())
            .unwrap();
        assert_eq!(
            x,
            vec![c(1.0, 1.0), c(-1.0, 1.0), c(-1.0, -1.0), c(1.0, -1.0)]
        );
    }

    #[test]
    fn qpsk_odd_length() {
        let modulator = QpskModulator::new();
        assert!(matches!(
            modulator.modulate(&bits(&[0, 1, 1]).unwrap()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn qpsk_demodulator_ties() {
        let demodulator = QpskDemodulator::new();
        let x = demodulator.demodulate(&[c(0.0, 0.5), c(0.5, 0.0), c(0.0, 0.0)]);
        assert_eq!(x, bits(&[0, 1, 1, 1, 1, 0]).unwrap());
    }

    #[test]
    fn empty_sequence() {
        for modulation in enum_iterator::all::<Modulation>() {
            let symbols = modulation.modulate(&BitSequence::from(vec![])).unwrap();
            assert!(symbols.is_empty());
            assert!(modulation.demodulate(&symbols).is_empty());
        }
    }

    #[test]
    fn noiseless_round_trip() {
        let mut rng = Rng::seed_from_u64(0);
        let tx = generate_bits(&mut rng, 1000).unwrap();
        for modulation in enum_iterator::all::<Modulation>() {
            let symbols = modulate(&tx, modulation).unwrap();
            assert_eq!(symbols.len(), tx.len() / modulation.bits_per_symbol());
            assert_eq!(demodulate(&symbols, modulation), tx);
        }
    }

    #[test]
    fn constellations() {
        assert_eq!(Modulation::Bpsk.symbol_energy(), 1.0);
        assert_eq!(Modulation::Qpsk.symbol_energy(), 2.0);
        for modulation in enum_iterator::all::<Modulation>() {
            let points = modulation.constellation();
            assert_eq!(points.len(), 1 << modulation.bits_per_symbol());
            for (j, a) in points.iter().enumerate() {
                for b in &points[j + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn from_str_display() {
        for modulation in enum_iterator::all::<Modulation>() {
            let s = modulation.to_string();
            assert_eq!(s.parse::<Modulation>().unwrap(), modulation);
        }
        assert!("8PSK".parse::<Modulation>().is_err());
    }
}
