//! Quantum Key Distribution (QKD) Protocols.
//!
//! - **BB84**: prepare-and-measure key exchange over two conjugate bases,
//!   split into its sifting and error-analysis phases.

pub mod analysis;
pub mod bb84;
pub mod sifting;
