//! Channel simulation.
//!
//! This module contains the simulation of an AWGN channel.

use crate::{Error, Result};
use clap::ValueEnum;
use num_complex::Complex;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Converts an SNR in dB units to a linear power ratio.
///
/// # Errors
///
/// Returns [`Error::Domain`] if `snr_db` is not finite.
pub fn snr_linear(snr_db: f64) -> Result<f64> {
    if !snr_db.is_finite() {
        return Err(Error::Domain(snr_db));
    }
    Ok(10.0_f64.powf(0.1 * snr_db))
}

/// Reference energy for the SNR.
///
/// This selects the signal energy with respect to which the SNR is defined
/// when computing the channel noise power.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, ValueEnum)]
pub enum NoiseReference {
    /// The SNR is referred to a unit symbol energy, regardless of the energy
    /// of the constellation. With QPSK the true SNR is 3 dB higher than the
    /// requested one.
    Unit,
    /// The SNR is referred to the average symbol energy of the constellation.
    #[default]
    Symbol,
}

impl NoiseReference {
    /// Returns the signal energy that the SNR refers to for a constellation
    /// with average symbol energy `symbol_energy`.
    pub fn signal_energy(&self, symbol_energy: f64) -> f64 {
        match self {
            NoiseReference::Unit => 1.0,
            NoiseReference::Symbol => symbol_energy,
        }
    }
}

impl std::fmt::Display for NoiseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NoiseReference::Unit => "unit",
                NoiseReference::Symbol => "symbol",
            }
        )
    }
}

/// AWGN channel simulation.
///
/// This struct is used to add circularly symmetric complex AWGN to symbols.
#[derive(Debug, Clone)]
pub struct AwgnChannel {
    distr: Normal<f64>,
}

impl AwgnChannel {
    /// Creates a new AWGN channel.
    ///
    /// The real and imaginary parts of the channel noise follow independent
    /// normal distributions with mean zero and standard deviation
    /// `noise_sigma`. The total noise power is `2 * noise_sigma * noise_sigma`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `noise_sigma` is negative or not
    /// finite. A `noise_sigma` of zero gives a noiseless channel.
    pub fn new(noise_sigma: f64) -> Result<AwgnChannel> {
        if !(noise_sigma.is_finite() && noise_sigma >= 0.0) {
            return Err(Error::InvalidInput(
                "the noise sigma must be a non-negative finite number",
            ));
        }
        Normal::new(0.0, noise_sigma)
            .map(|distr| AwgnChannel { distr })
            .map_err(|_| Error::InvalidInput("invalid noise sigma"))
    }

    /// Creates an AWGN channel for an SNR given in dB units.
    ///
    /// The noise power is `signal_energy / snr`, where `snr` is the linear SNR.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if `snr_db` is not finite, or if it is so
    /// low (below about -3000 dB) that the noise power overflows.
    pub fn from_snr_db(snr_db: f64, signal_energy: f64) -> Result<AwgnChannel> {
        let noise_power = signal_energy / snr_linear(snr_db)?;
        if !noise_power.is_finite() {
            return Err(Error::Domain(snr_db));
        }
        AwgnChannel::new((0.5 * noise_power).sqrt())
    }

    /// Returns the standard deviation of each noise component.
    pub fn noise_sigma(&self) -> f64 {
        self.distr.std_dev()
    }

    /// Adds noise to a sequence of symbols.
    ///
    /// The noise is added in-place to the slice `symbols`. An [Rng] is used as
    /// source of randomness.
    pub fn add_noise<R: Rng>(&self, rng: &mut R, symbols: &mut [Complex<f64>]) {
        for x in symbols.iter_mut() {
            let re = self.distr.sample(rng);
            let im = self.distr.sample(rng);
            *x += Complex::new(re, im);
        }
    }
}

/// Passes a sequence of symbols through an AWGN channel.
///
/// The SNR `snr_db` is referred to a unit symbol energy (see
/// [`NoiseReference::Unit`]). The input symbols are not modified.
///
/// # Errors
///
/// Returns [`Error::Domain`] if `snr_db` is not finite, or if the noise power
/// for `snr_db` cannot be represented as a finite number (SNRs below about
/// -3000 dB). Very high SNRs give a noiseless channel.
pub fn apply_channel<R: Rng>(
    rng: &mut R,
    symbols: &[Complex<f64>],
    snr_db: f64,
) -> Result<Vec<Complex<f64>>> {
    let channel = AwgnChannel::from_snr_db(snr_db, 1.0)?;
    let mut received = symbols.to_vec();
    channel.add_noise(rng, &mut received);
    Ok(received)
}
