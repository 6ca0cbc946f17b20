//! Error type.

use thiserror::Error;

/// Link simulation error.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum Error {
    /// An argument is outside the values accepted by the operation.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The transmitted and received bit sequences have different lengths.
    #[error("length mismatch: {transmitted} transmitted bits but {received} received bits")]
    LengthMismatch {
        /// Length of the transmitted sequence.
        transmitted: usize,
        /// Length of the received sequence.
        received: usize,
    },
    /// A real-valued argument is outside its domain (for instance a
    /// non-finite SNR).
    #[error("value {0} outside of domain")]
    Domain(f64),
}

/// Result type used by the link simulation.
pub type Result<T> = std::result::Result<T, Error>;
