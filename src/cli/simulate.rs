//! Simulate CLI subcommand.
//!
//! This subcommand runs the link once for a given modulation and SNR, and
//! prints the BER together with a comparison against the other modulation
//! schemes.
//!
//! # Examples
//!
//! A QPSK link with 10000 bits at an SNR of 6 dB can be run with
//! ```shell
//! $ psk-link simulate --modulation QPSK --num-bits 10000 --snr-db 6 \
//!       --constellation-file qpsk.csv
//! ```
//!
//! The constellation file contains one `stage,re,im` row per symbol, where the
//! stage is either `transmitted` or `received`.

use crate::{
    cli::*,
    rand::{Rng, SeedableRng},
    simulation::{
        channel::NoiseReference,
        comparison::{compare_schemes, figures_for, BerFigure, Comparison},
        link::{LinkReport, LinkTest},
        modulation::Modulation,
    },
};
use clap::Parser;
use num_complex::Complex;
use std::{error::Error, fs::File, io::Write};

/// Simulate CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Runs the link once")]
pub struct Args {
    /// Number of bits to transmit
    #[arg(long, default_value = "1000")]
    num_bits: usize,
    /// SNR (dB)
    #[arg(long, default_value = "10", allow_negative_numbers = true)]
    snr_db: f64,
    /// Modulation
    #[arg(long, default_value_t = Modulation::Bpsk)]
    modulation: Modulation,
    /// Energy to which the SNR is referred
    #[arg(long, value_enum, default_value_t = NoiseReference::Symbol)]
    noise_reference: NoiseReference,
    /// Seed for the random generator (random if not given)
    #[arg(long)]
    seed: Option<u64>,
    /// Output CSV file for the transmitted and received constellations
    #[arg(long)]
    constellation_file: Option<String>,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let seed = seed_or_random(self.seed);
        let test = LinkTest {
            num_bits: self.num_bits,
            modulation: self.modulation,
            snr_db: self.snr_db,
            noise_reference: self.noise_reference,
        };
        let report = test.run(&mut Rng::seed_from_u64(seed))?;
        tracing::info!(seed, ber = report.statistics.ber, "simulation done");
        let figures = figures_for(&report.statistics, self.modulation, self.snr_db)?;
        let comparison = compare_schemes(&figures);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.write_details(&mut out, seed)?;
        write_results(&mut out, &report, &comparison)?;
        if let Some(path) = &self.constellation_file {
            write_constellations(File::create(path)?, &report)?;
        }
        Ok(())
    }
}

impl Args {
    fn write_details<W: Write>(&self, mut f: W, seed: u64) -> std::io::Result<()> {
        writeln!(f, "LINK PARAMETERS")?;
        writeln!(f, "---------------")?;
        writeln!(f, " - Modulation: {}", self.modulation)?;
        writeln!(f, " - Number of bits: {}", self.num_bits)?;
        writeln!(f, " - SNR: {:.2} dB", self.snr_db)?;
        writeln!(f, " - Noise reference: {}", self.noise_reference)?;
        writeln!(f, " - Seed: {seed}")?;
        writeln!(f)?;
        Ok(())
    }
}

fn write_results<W: Write>(
    mut f: W,
    report: &LinkReport,
    comparison: &Comparison,
) -> std::io::Result<()> {
    let stats = &report.statistics;
    writeln!(f, "Bit errors: {} / {}", stats.bit_errors, stats.num_bits)?;
    writeln!(f, "Bit Error Rate (BER): {:.4}", stats.ber)?;
    writeln!(f)?;
    writeln!(f, "Modulation scheme comparison:")?;
    for (rank, (scheme, figure)) in comparison.ranking.iter().enumerate() {
        let tag = match figure {
            BerFigure::Measured(_) => "measured",
            BerFigure::Placeholder(_) => "placeholder",
        };
        writeln!(
            f,
            " {}. {}: {:.4e} ({tag})",
            rank + 1,
            scheme,
            figure.ber()
        )?;
    }
    if let Some(best) = comparison.best {
        writeln!(f, "Lowest BER: {best}")?;
    }
    Ok(())
}

fn write_constellations<W: Write>(mut f: W, report: &LinkReport) -> std::io::Result<()> {
    writeln!(f, "stage,re,im")?;
    let stages: [(&str, &[Complex<f64>]); 2] = [
        ("transmitted", &report.transmitted_symbols),
        ("received", &report.received_symbols),
    ];
    for (stage, symbols) in stages {
        for s in symbols {
            writeln!(f, "{stage},{},{}", s.re, s.im)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::simulation::ber::Statistics;

    fn report() -> LinkReport {
        let test = LinkTest {
            num_bits: 4,
            modulation: Modulation::Qpsk,
            snr_db: 10.0,
            noise_reference: NoiseReference::Symbol,
        };
        test.run(&mut Rng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn constellation_csv() {
        let report = report();
        let mut buf = Vec::new();
        write_constellations(&mut buf, &report).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "stage,re,im");
        assert!(lines[1].starts_with("transmitted,"));
        assert!(lines[4].starts_with("received,"));
    }

    #[test]
    fn results_mark_placeholders() {
        let mut report = report();
        report.statistics = Statistics {
            num_bits: 4,
            bit_errors: 0,
            ber: 0.0,
        };
        let figures = figures_for(&report.statistics, Modulation::Qpsk, 10.0).unwrap();
        let comparison = compare_schemes(&figures);
        let mut buf = Vec::new();
        write_results(&mut buf, &report, &comparison).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("QPSK: 0.0000e0 (measured)"));
        assert!(text.contains("8PSK: 1.5000e-1 (placeholder)"));
        assert!(text.contains("Lowest BER: QPSK"));
    }
}
