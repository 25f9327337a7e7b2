//! Quantum Cryptography Protocols.
//!
//! This module contains the BB84 quantum key distribution protocol and its
//! post-processing phases.

pub mod qkd;
pub use qkd::{analysis, bb84, sifting};
