//! Modulation scheme comparison.
//!
//! This module ranks the BER figures of several modulation schemes. Only the
//! simulated modulation has a measured BER. The other schemes can be given
//! placeholder figures, which are ranked together with the measured one but
//! remain tagged as placeholders.

use super::{ber::Statistics, modulation::Modulation};
use crate::{Error, Result};
use clap::ValueEnum;
use enum_iterator::Sequence;
use std::{cmp::Ordering, collections::BTreeMap};

/// Modulation scheme in a comparison.
///
/// The order of the variants is the priority used to break ties between
/// schemes with the same BER.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Sequence, ValueEnum)]
#[clap(rename_all = "UPPER")]
pub enum Scheme {
    /// BPSK.
    Bpsk,
    /// QPSK.
    Qpsk,
    /// 8PSK.
    #[clap(name = "8PSK")]
    Psk8,
}

impl From<Modulation> for Scheme {
    fn from(modulation: Modulation) -> Scheme {
        match modulation {
            Modulation::Bpsk => Scheme::Bpsk,
            Modulation::Qpsk => Scheme::Qpsk,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Scheme::Bpsk => "BPSK",
                Scheme::Qpsk => "QPSK",
                Scheme::Psk8 => "8PSK",
            }
        )
    }
}

/// BER figure of a scheme.
///
/// [`BerFigure::measured`] and [`BerFigure::placeholder`] check that the BER
/// is in [0, 1]. Figures built directly from the variants are not checked.
/// They are still ranked deterministically by [`compare_schemes`], with a NaN
/// BER placed after every other figure.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BerFigure {
    /// BER measured by simulating the link.
    Measured(f64),
    /// Illustrative BER which has not been obtained by simulation.
    Placeholder(f64),
}

impl BerFigure {
    /// Creates a measured BER figure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if `ber` is not in [0, 1].
    pub fn measured(ber: f64) -> Result<BerFigure> {
        Self::check(ber).map(BerFigure::Measured)
    }

    /// Creates a placeholder BER figure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if `ber` is not in [0, 1].
    pub fn placeholder(ber: f64) -> Result<BerFigure> {
        Self::check(ber).map(BerFigure::Placeholder)
    }

    fn check(ber: f64) -> Result<f64> {
        if (0.0..=1.0).contains(&ber) {
            Ok(ber)
        } else {
            Err(Error::Domain(ber))
        }
    }

    /// Returns the BER value.
    pub fn ber(&self) -> f64 {
        match self {
            BerFigure::Measured(x) | BerFigure::Placeholder(x) => *x,
        }
    }

    /// Returns `true` if the figure was measured.
    pub fn is_measured(&self) -> bool {
        matches!(self, BerFigure::Measured(_))
    }
}

impl From<&Statistics> for BerFigure {
    fn from(stats: &Statistics) -> BerFigure {
        BerFigure::Measured(stats.ber)
    }
}

/// Result of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Schemes sorted by ascending BER.
    pub ranking: Vec<(Scheme, BerFigure)>,
    /// Scheme with the lowest BER, or `None` if there were no figures.
    pub best: Option<Scheme>,
}

fn order(a: &(Scheme, BerFigure), b: &(Scheme, BerFigure)) -> Ordering {
    a.1.ber().total_cmp(&b.1.ber()).then(a.0.cmp(&b.0))
}

/// Ranks BER figures.
///
/// The schemes are sorted by ascending BER. Schemes with equal BER are sorted
/// according to the order of [`Scheme`], so that BPSK goes before QPSK, and
/// QPSK before 8PSK.
///
/// # Examples
/// ```
/// # use psk_link::simulation::comparison::*;
/// # use std::collections::BTreeMap;
/// let figures = BTreeMap::from([
///     (Scheme::Psk8, BerFigure::Placeholder(0.08)),
///     (Scheme::Qpsk, BerFigure::Placeholder(0.05)),
///     (Scheme::Bpsk, BerFigure::Measured(0.01)),
/// ]);
/// let comparison = compare_schemes(&figures);
/// assert_eq!(comparison.best, Some(Scheme::Bpsk));
/// ```
pub fn compare_schemes(figures: &BTreeMap<Scheme, BerFigure>) -> Comparison {
    let mut ranking = figures
        .iter()
        .map(|(&s, &f)| (s, f))
        .collect::<Vec<_>>();
    ranking.sort_by(order);
    let best = ranking.first().map(|&(s, _)| s);
    Comparison { ranking, best }
}

/// Returns the scheme with the lowest BER.
///
/// Ties are broken as in [`compare_schemes`].
pub fn best(figures: &BTreeMap<Scheme, BerFigure>) -> Option<Scheme> {
    figures
        .iter()
        .map(|(&s, &f)| (s, f))
        .min_by(order)
        .map(|(s, _)| s)
}

/// Returns the illustrative placeholder BER of a scheme at an SNR.
///
/// These are the figures that are shown for schemes that have not been
/// simulated: 0.1 * SNR / 10 for QPSK and 0.15 * SNR / 10 for 8PSK, with the
/// SNR in dB, clamped to [0, 1]. BPSK has no placeholder figure because it can
/// always be simulated.
pub fn placeholder_ber(scheme: Scheme, snr_db: f64) -> Option<f64> {
    let slope = match scheme {
        Scheme::Bpsk => return None,
        Scheme::Qpsk => 0.1,
        Scheme::Psk8 => 0.15,
    };
    Some((slope * (snr_db / 10.0)).clamp(0.0, 1.0))
}

/// Builds the figures for a comparison.
///
/// The simulated `modulation` gets the BER measured in `stats`. All the other
/// schemes that have a placeholder get their placeholder figure at `snr_db`.
///
/// # Errors
///
/// Returns [`Error::Domain`] if `snr_db` is not finite.
pub fn figures_for(
    stats: &Statistics,
    modulation: Modulation,
    snr_db: f64,
) -> Result<BTreeMap<Scheme, BerFigure>> {
    if !snr_db.is_finite() {
        return Err(Error::Domain(snr_db));
    }
    let simulated = Scheme::from(modulation);
    let mut figures = BTreeMap::new();
    for scheme in enum_iterator::all::<Scheme>() {
        if scheme == simulated {
            figures.insert(scheme, BerFigure::measured(stats.ber)?);
        } else if let Some(ber) = placeholder_ber(scheme, snr_db) {
            figures.insert(scheme, BerFigure::placeholder(ber)?);
        }
    }
    Ok(figures)
}
