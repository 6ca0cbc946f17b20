//! Link test.
//!
//! This module runs the complete link: bit source, modulator, AWGN channel,
//! demodulator and BER computation, either once or for a list of SNRs.

use super::{
    ber::Statistics,
    channel::{AwgnChannel, NoiseReference},
    modulation::Modulation,
    source::generate_bits,
};
use crate::{bit::BitSequence, rand::rng_for_run, Error, Result};
use num_complex::Complex;
use rand::Rng;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Link test.
///
/// This struct contains the parameters of a single run of the link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkTest {
    /// Number of bits to transmit.
    pub num_bits: usize,
    /// Modulation.
    pub modulation: Modulation,
    /// SNR in dB units.
    pub snr_db: f64,
    /// Energy to which the SNR is referred.
    pub noise_reference: NoiseReference,
}

/// Link test report.
///
/// This contains the signals at each stage of the link together with the
/// BER statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkReport {
    /// Transmitted bits.
    pub transmitted_bits: BitSequence,
    /// Transmitted symbols (noiseless constellation).
    pub transmitted_symbols: Vec<Complex<f64>>,
    /// Symbols at the channel output.
    pub received_symbols: Vec<Complex<f64>>,
    /// Bits recovered by the demodulator.
    pub received_bits: BitSequence,
    /// BER statistics.
    pub statistics: Statistics,
}

impl LinkTest {
    /// Checks the parameters of the link test.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the number of bits is zero or is not
    /// a multiple of the bits per symbol of the modulation, and
    /// [`Error::Domain`] if the SNR is not finite.
    pub fn validate(&self) -> Result<()> {
        if self.num_bits == 0 {
            return Err(Error::InvalidInput("the number of bits must be positive"));
        }
        if self.num_bits % self.modulation.bits_per_symbol() != 0 {
            return Err(Error::InvalidInput(
                "the number of bits must be a multiple of the bits per symbol",
            ));
        }
        if !self.snr_db.is_finite() {
            return Err(Error::Domain(self.snr_db));
        }
        Ok(())
    }

    fn channel(&self) -> Result<AwgnChannel> {
        let energy = self
            .noise_reference
            .signal_energy(self.modulation.symbol_energy());
        AwgnChannel::from_snr_db(self.snr_db, energy)
    }

    /// Runs the link test.
    ///
    /// An [Rng] is used as source of randomness, both for the transmitted bits
    /// and for the channel noise.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<LinkReport> {
        self.validate()?;
        let channel = self.channel()?;
        tracing::debug!(
            num_bits = self.num_bits,
            modulation = %self.modulation,
            snr_db = self.snr_db,
            noise_sigma = channel.noise_sigma(),
            "running link test"
        );
        let transmitted_bits = generate_bits(&mut *rng, self.num_bits)?;
        let transmitted_symbols = self.modulation.modulate(&transmitted_bits)?;
        let mut received_symbols = transmitted_symbols.clone();
        channel.add_noise(rng, &mut received_symbols);
        let received_bits = self.modulation.demodulate(&received_symbols);
        let statistics = Statistics::new(&transmitted_bits, &received_bits)?;
        tracing::debug!(
            bit_errors = statistics.bit_errors,
            ber = statistics.ber,
            "link test finished"
        );
        Ok(LinkReport {
            transmitted_bits,
            transmitted_symbols,
            received_symbols,
            received_bits,
            statistics,
        })
    }
}

/// Result of one point of an SNR sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// SNR in dB units.
    pub snr_db: f64,
    /// BER statistics.
    pub statistics: Statistics,
    /// Elapsed time for this point.
    pub elapsed: Duration,
}

/// Runs a link test for each SNR in `snrs_db`.
///
/// The `snr_db` field of `test` is ignored. The points are run in parallel in
/// the current [rayon] thread pool. The point with index `k` uses its own RNG,
/// seeded with `seed` and using the ChaCha stream `k`, so the results only
/// depend on `seed` and not on how the points are scheduled. The points are
/// returned in the same order as `snrs_db`.
pub fn sweep(test: &LinkTest, snrs_db: &[f64], seed: u64) -> Result<Vec<SweepPoint>> {
    let points = snrs_db
        .par_iter()
        .enumerate()
        .map(|(k, &snr_db)| -> Result<SweepPoint> {
            let start = Instant::now();
            let mut rng = rng_for_run(seed, k as u64);
            let report = LinkTest { snr_db, ..*test }.run(&mut rng)?;
            let point = SweepPoint {
                snr_db,
                statistics: report.statistics,
                elapsed: start.elapsed(),
            };
            tracing::debug!(snr_db, ber = point.statistics.ber, "sweep point done");
            Ok(point)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(points)
}

/// Maximum number of SNRs returned by [`snr_range`].
pub const MAX_SNRS: usize = 100_000;

/// Returns the list of SNRs between `min_snr_db` and `max_snr_db` (both
/// included) in steps of `step_snr_db`.
///
/// # Errors
///
/// Returns [`Error::Domain`] if any of the values is not finite, and
/// [`Error::InvalidInput`] if the step is not positive, the maximum is lower
/// than the minimum, or the range contains more than [`MAX_SNRS`] values.
pub fn snr_range(min_snr_db: f64, max_snr_db: f64, step_snr_db: f64) -> Result<Vec<f64>> {
    for x in [min_snr_db, max_snr_db, step_snr_db] {
        if !x.is_finite() {
            return Err(Error::Domain(x));
        }
    }
    if step_snr_db <= 0.0 {
        return Err(Error::InvalidInput("the SNR step must be positive"));
    }
    if max_snr_db < min_snr_db {
        return Err(Error::InvalidInput(
            "the maximum SNR must not be lower than the minimum SNR",
        ));
    }
    // A small tolerance so that the maximum is included despite rounding.
    let num_snrs = ((max_snr_db - min_snr_db) / step_snr_db + 1e-9).floor() + 1.0;
    if !(num_snrs.is_finite() && num_snrs <= MAX_SNRS as f64) {
        return Err(Error::InvalidInput("too many SNRs in the range"));
    }
    let num_snrs = num_snrs as usize;
    Ok((0..num_snrs)
        .map(|k| min_snr_db + k as f64 * step_snr_db)
        .collect())
}
