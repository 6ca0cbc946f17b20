//! Simulation.
//!
//! This module contains the link simulation: bit generation, PSK modulation,
//! an AWGN channel, hard-decision demodulation and BER computation.
//!
//! The free functions re-exported here form the function-level API of the
//! link. A whole run can also be done with [`link::LinkTest`].
//!
//! # Examples
//! ```
//! # use psk_link::rand::*;
//! # use psk_link::simulation::*;
//! let mut rng = Rng::seed_from_u64(0);
//! let tx = generate_bits(&mut rng, 1000).unwrap();
//! let symbols = modulate(&tx, Modulation::Qpsk).unwrap();
//! let received = apply_channel(&mut rng, &symbols, 10.0).unwrap();
//! let rx = demodulate(&received, Modulation::Qpsk);
//! let ber = compute_ber(&tx, &rx).unwrap();
//! assert!(ber < 0.01);
//! ```

pub mod ber;
pub mod channel;
pub mod comparison;
pub mod link;
pub mod modulation;
pub mod source;

pub use ber::compute_ber;
pub use channel::apply_channel;
pub use comparison::compare_schemes;
pub use modulation::{demodulate, modulate, Modulation};
pub use source::generate_bits;
