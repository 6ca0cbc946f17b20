//! `psk-link` CLI application
//!
//! The CLI application is organized in several subcommands. The
//! supported subcommands can be seen by running `psk-link`.
//! See the modules below for examples and more information about
//! how to use each subcommand.
//!
//! Log messages are written to stderr. Their verbosity is controlled with
//! the `RUST_LOG` environment variable (the default level is `warn`).

use clap::Parser;
use std::error::Error;
use tracing_subscriber::{fmt, EnvFilter};

pub mod compare;
pub mod simulate;
pub mod sweep;

/// Trait to run a CLI subcommand
pub trait Run {
    /// Run the CLI subcommand
    fn run(&self) -> Result<(), Box<dyn Error>>;
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(author, version, name = "psk-link", about = "PSK link simulator")]
pub enum Args {
    /// simulate subcommand
    Simulate(simulate::Args),
    /// sweep subcommand
    Sweep(sweep::Args),
    /// compare subcommand
    Compare(compare::Args),
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn Error>> {
        match self {
            Args::Simulate(x) => x.run(),
            Args::Sweep(x) => x.run(),
            Args::Compare(x) => x.run(),
        }
    }
}

/// Initializes logging to stderr.
///
/// The filter is taken from `RUST_LOG`, falling back to `warn`.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns the seed to use for a run.
///
/// If no seed is given in the command line, a random one is drawn so that it
/// can be reported and the run replayed.
pub fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
