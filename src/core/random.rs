//! Randomness capability for the protocol roles.
//!
//! Every role draws its bits and bases through [`RandomSource`] instead of
//! reaching for a global generator, so a session can be replayed by handing it
//! a seeded `StdRng`.

use crate::core::Basis;
use rand::{Rng, RngCore};

/// Source of uniformly random bits and bases.
///
/// Implemented for every `rand::RngCore`. Sequence lengths are `usize`, so a
/// negative count cannot be requested; a count of zero yields an empty vector.
pub trait RandomSource {
    /// A single fair bit.
    fn random_bit(&mut self) -> bool;

    /// `true` with the given probability. Callers validate `probability`.
    fn random_event(&mut self, probability: f64) -> bool;

    /// A single basis, uniform over both.
    fn random_basis(&mut self) -> Basis {
        Basis::from(self.random_bit())
    }

    /// `n` independent fair bits.
    fn random_bits(&mut self, n: usize) -> Vec<bool> {
        (0..n).map(|_| self.random_bit()).collect()
    }

    /// `n` independent uniform bases.
    fn random_bases(&mut self, n: usize) -> Vec<Basis> {
        (0..n).map(|_| self.random_basis()).collect()
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn random_bit(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn random_event(&mut self, probability: f64) -> bool {
        self.random_bool(probability)
    }
}
