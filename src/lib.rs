//! # PSK link
//!
//! `psk_link` simulates a digital communication link: a random bit source, a
//! BPSK or QPSK modulator, an AWGN channel, a hard-decision demodulator and
//! the measurement of the bit error rate.
//!
//! It can be used as a Rust library or as a CLI tool that runs the link from
//! the command line. See [`cli`] for documentation about the usage of the CLI
//! tool.

#![warn(missing_docs)]

pub mod bit;
pub mod cli;
pub mod rand;
pub mod simulation;

mod error;
pub use error::{Error, Result};
