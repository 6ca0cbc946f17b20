//! Sweep CLI subcommand.
//!
//! This subcommand measures the BER of the link for a range of SNRs.
//!
//! # Examples
//!
//! The BER of BPSK between 0 and 10 dB in steps of 0.5 dB can be measured
//! with
//! ```shell
//! $ psk-link sweep --min-snr-db 0 --max-snr-db 10 --step-snr-db 0.5 \
//!       --num-bits 1000000 --output-file bpsk.txt
//! ```

use crate::{
    cli::*,
    simulation::{
        channel::NoiseReference,
        link::{snr_range, sweep, LinkTest, SweepPoint},
        modulation::Modulation,
    },
};
use clap::Parser;
use console::Term;
use std::{
    error::Error,
    fs::File,
    io::Write,
    time::{Duration, Instant},
};

/// Sweep CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Measures the BER for a range of SNRs")]
pub struct Args {
    /// Output file for the results
    #[arg(long)]
    output_file: Option<String>,
    /// Modulation
    #[arg(long, default_value_t = Modulation::Bpsk)]
    modulation: Modulation,
    /// Energy to which the SNR is referred
    #[arg(long, value_enum, default_value_t = NoiseReference::Symbol)]
    noise_reference: NoiseReference,
    /// Minimum SNR (dB)
    #[arg(long, allow_negative_numbers = true)]
    min_snr_db: f64,
    /// Maximum SNR (dB)
    #[arg(long, allow_negative_numbers = true)]
    max_snr_db: f64,
    /// SNR step (dB)
    #[arg(long)]
    step_snr_db: f64,
    /// Number of bits to transmit for each SNR
    #[arg(long, default_value = "100000")]
    num_bits: usize,
    /// Seed for the random generator (random if not given)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(long)]
    threads: Option<usize>,
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let snrs = snr_range(self.min_snr_db, self.max_snr_db, self.step_snr_db)?;
        let seed = seed_or_random(self.seed);
        let test = LinkTest {
            num_bits: self.num_bits,
            modulation: self.modulation,
            // Replaced by each of the SNRs in the sweep.
            snr_db: self.min_snr_db,
            noise_reference: self.noise_reference,
        };
        test.validate()?;
        let mut output_file = if let Some(f) = &self.output_file {
            Some(File::create(f)?)
        } else {
            None
        };
        let threads = self.threads.unwrap_or_else(num_cpus::get);
        self.write_details(std::io::stdout(), seed, threads, snrs.len())?;
        if let Some(f) = &mut output_file {
            self.write_details(&*f, seed, threads, snrs.len())?;
        }

        let term = Term::stdout();
        ctrlc::set_handler({
            let term = term.clone();
            move || {
                let _ = term.write_line("");
                let _ = term.show_cursor();
                std::process::exit(0);
            }
        })?;
        term.set_title("psk-link sweep");
        term.hide_cursor()?;
        term.write_line("Running...")?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        let start = Instant::now();
        let points = pool.install(|| sweep(&test, &snrs, seed));
        let elapsed = start.elapsed();
        term.move_cursor_up(1)?;
        term.clear_line()?;
        term.show_cursor()?;
        let points = points?;
        tracing::info!(points = points.len(), ?elapsed, "sweep done");

        term.write_line(format_header())?;
        if let Some(f) = &mut output_file {
            writeln!(f, "{}", format_header())?;
        }
        for point in &points {
            term.write_line(&format_point(point))?;
            if let Some(f) = &mut output_file {
                writeln!(f, "{}", format_point(point))?;
            }
        }
        term.write_line("")?;
        term.write_line(&format!(
            "Elapsed: {}",
            humantime::format_duration(Duration::from_millis(elapsed.as_millis() as u64))
        ))?;
        Ok(())
    }
}

impl Args {
    fn write_details<W: Write>(
        &self,
        mut f: W,
        seed: u64,
        threads: usize,
        num_snrs: usize,
    ) -> std::io::Result<()> {
        writeln!(f, "SWEEP PARAMETERS")?;
        writeln!(f, "----------------")?;
        writeln!(f, "Simulation:")?;
        writeln!(f, " - Minimum SNR: {:.2} dB", self.min_snr_db)?;
        writeln!(f, " - Maximum SNR: {:.2} dB", self.max_snr_db)?;
        writeln!(f, " - SNR step: {:.2} dB", self.step_snr_db)?;
        writeln!(f, " - Number of SNRs: {num_snrs}")?;
        writeln!(f, " - Bits per SNR: {}", self.num_bits)?;
        writeln!(f, " - Seed: {seed}")?;
        writeln!(f, " - Threads: {threads}")?;
        writeln!(f, "Channel:")?;
        writeln!(f, " - Modulation: {}", self.modulation)?;
        writeln!(f, " - Noise reference: {}", self.noise_reference)?;
        writeln!(f)?;
        Ok(())
    }
}

fn format_header() -> &'static str {
    "    SNR |       Bits | Bit errs |     BER | Elapsed\n\
     --------|------------|----------|---------|----------"
}

fn format_point(point: &SweepPoint) -> String {
    format!(
        "{:7.2} | {:10} | {:8} | {:7.2e} | {}",
        point.snr_db,
        point.statistics.num_bits,
        point.statistics.bit_errors,
        point.statistics.ber,
        humantime::format_duration(Duration::from_millis(point.elapsed.as_millis() as u64))
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::simulation::ber::Statistics;

    #[test]
    fn point_row() {
        let point = SweepPoint {
            snr_db: 2.5,
            statistics: Statistics {
                num_bits: 1000,
                bit_errors: 37,
                ber: 0.037,
            },
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(
            format_point(&point),
            "   2.50 |       1000 |       37 | 3.70e-2 | 1s 500ms"
        );
    }

    #[test]
    fn header_matches_rows() {
        let header = format_header().lines().next().unwrap();
        assert_eq!(header.matches('|').count(), 4);
    }
}
