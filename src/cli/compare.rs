//! Compare CLI subcommand.
//!
//! This subcommand ranks BER figures given in the command line. This is
//! useful to compare BERs obtained in different runs of the `simulate` and
//! `sweep` subcommands, or obtained elsewhere.
//!
//! # Examples
//!
//! ```shell
//! $ psk-link compare --bpsk 0.01 --qpsk 0.05 --psk8 0.08 --placeholder 8PSK
//! ```

use crate::{
    cli::*,
    simulation::comparison::{compare_schemes, BerFigure, Comparison, Scheme},
};
use clap::Parser;
use std::{collections::BTreeMap, error::Error, io::Write};

/// Compare CLI arguments.
#[derive(Debug, Parser)]
#[command(about = "Ranks modulation schemes by BER")]
pub struct Args {
    /// BPSK BER
    #[arg(long)]
    bpsk: Option<f64>,
    /// QPSK BER
    #[arg(long)]
    qpsk: Option<f64>,
    /// 8PSK BER
    #[arg(long)]
    psk8: Option<f64>,
    /// Schemes whose BER is a placeholder rather than a measurement
    #[arg(long, value_enum)]
    placeholder: Vec<Scheme>,
}

impl Args {
    fn figures(&self) -> crate::Result<BTreeMap<Scheme, BerFigure>> {
        let mut figures = BTreeMap::new();
        for (scheme, ber) in [
            (Scheme::Bpsk, self.bpsk),
            (Scheme::Qpsk, self.qpsk),
            (Scheme::Psk8, self.psk8),
        ] {
            let Some(ber) = ber else {
                continue;
            };
            let figure = if self.placeholder.contains(&scheme) {
                BerFigure::placeholder(ber)?
            } else {
                BerFigure::measured(ber)?
            };
            figures.insert(scheme, figure);
        }
        Ok(figures)
    }
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        let figures = self.figures()?;
        if figures.is_empty() {
            return Err("no BER figures given".into());
        }
        let comparison = compare_schemes(&figures);
        write_ranking(std::io::stdout(), &comparison)?;
        Ok(())
    }
}

fn write_ranking<W: Write>(mut f: W, comparison: &Comparison) -> std::io::Result<()> {
    writeln!(f, "Rank | Scheme |       BER | Source")?;
    writeln!(f, "-----|--------|-----------|------------")?;
    for (rank, (scheme, figure)) in comparison.ranking.iter().enumerate() {
        let source = if figure.is_measured() {
            "measured"
        } else {
            "placeholder"
        };
        writeln!(
            f,
            "{:4} | {:>6} | {:9.3e} | {source}",
            rank + 1,
            scheme.to_string(),
            figure.ber()
        )?;
    }
    if let Some(best) = comparison.best {
        writeln!(f)?;
        writeln!(f, "Best: {best}")?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ranking_from_args() {
        let args = Args::try_parse_from([
            "compare",
            "--bpsk",
            "0.01",
            "--qpsk",
            "0.05",
            "--psk8",
            "0.08",
            "--placeholder",
            "8PSK",
            "--placeholder",
            "QPSK",
        ])
        .unwrap();
        let figures = args.figures().unwrap();
        assert_eq!(figures[&Scheme::Bpsk], BerFigure::Measured(0.01));
        assert_eq!(figures[&Scheme::Psk8], BerFigure::Placeholder(0.08));
        let comparison = compare_schemes(&figures);
        let mut buf = Vec::new();
        write_ranking(&mut buf, &comparison).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let rows = text.lines().skip(2).take(3).collect::<Vec<_>>();
        assert!(rows[0].contains("BPSK") && rows[0].ends_with("measured"));
        assert!(rows[1].contains("QPSK") && rows[1].ends_with("placeholder"));
        assert!(rows[2].contains("8PSK"));
        assert!(text.ends_with("Best: BPSK\n"));
    }

    #[test]
    fn out_of_range() {
        let args = Args::try_parse_from(["compare", "--qpsk", "1.5"]).unwrap();
        assert!(args.figures().is_err());
    }
}
