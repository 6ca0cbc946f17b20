//! # Reproducible random functions
//!
//! This module uses the [`ChaCha8Rng`] RNG from the [rand_chacha] crate
//! to achieve reproducible bit generation and channel noise.
//!
//! # Examples
//! ```
//! # use psk_link::rand::*;
//! let seed = 42;
//! let mut rng = Rng::seed_from_u64(seed);
//! assert_eq!(rng.next_u64(), 12578764544318200737);
//! ```
use rand_chacha::ChaCha8Rng;
pub use rand_chacha::rand_core::SeedableRng;
pub use rand_core::RngCore;

/// The RNG used throughout this crate for bit generation and noise.
pub type Rng = ChaCha8Rng;

/// Creates the RNG for one of several independent simulation runs.
///
/// All the runs share the same `seed`, and each of them uses a different
/// ChaCha stream, so that the sequences do not overlap and do not depend on
/// the order in which the runs are executed.
pub fn rng_for_run(seed: u64, run: u64) -> Rng {
    let mut rng = Rng::seed_from_u64(seed);
    rng.set_stream(run);
    rng
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn runs_are_independent() {
        let a = rng_for_run(7, 0).next_u64();
        let b = rng_for_run(7, 1).next_u64();
        assert_ne!(a, b);
        assert_eq!(a, rng_for_run(7, 0).next_u64());
    }
}
