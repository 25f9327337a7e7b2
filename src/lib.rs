//! BB84 quantum key distribution simulator.
//!
//! Models the measurement statistics of the BB84 protocol between a sender
//! (Alice) and a receiver (Bob), optionally with an intercept-resend
//! eavesdropper (Eve) on the fiber:
//!
//! ```text
//! prepare → transmit (→ Eve) → measure → sift → analyze
//! ```
//!
//! All randomness flows through [`RandomSource`], implemented for every
//! `rand` generator, so a seeded `StdRng` replays a session exactly.
//!
//! # Example
//!
//! ```
//! use bb84_sim::protocols::bb84::{self, SessionConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = SessionConfig::new(1_000).unwrap().with_eavesdropper(true);
//! let result = bb84::run(&config, &mut StdRng::seed_from_u64(7)).unwrap();
//!
//! assert!(!result.verdict().is_secure());
//! ```

mod core;
pub mod protocols;
pub mod report;
mod sampler;

pub use crate::core::{
    Basis, Interception, QuantumChannel, RandomSource, Stage, Transmission, errors, measure,
    measure_all,
};
pub use crate::report::Report;
pub use crate::sampler::{QberSummary, Sampler};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
