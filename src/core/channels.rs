use crate::core::errors::{ConfigError, ProtocolError, ensure_same_length};
use crate::core::measurements::measure;
use crate::core::{Basis, RandomSource, Stage};
use tracing::debug;

/// The optical link between sender and receiver.
///
/// Both modes run through [`QuantumChannel::transmit`]; the `intercept` flag
/// only decides whether an intercept-resend eavesdropper sits on the fiber.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantumChannel {
    /// Whether an eavesdropper measures and re-emits every photon.
    pub intercept: bool,
    /// Probability that a photon's bit is flipped in the fiber.
    pub bit_flip: f64,
}

impl Default for QuantumChannel {
    fn default() -> Self {
        Self::undisturbed()
    }
}

impl QuantumChannel {
    pub fn new(intercept: bool) -> Self {
        Self {
            intercept,
            bit_flip: 0.0,
        }
    }

    /// Noise-free fiber, nobody listening.
    pub fn undisturbed() -> Self {
        Self::new(false)
    }

    /// Noise-free fiber with an intercept-resend eavesdropper.
    pub fn intercepted() -> Self {
        Self::new(true)
    }

    /// Adds bit-flip noise to the fiber. The flip happens before any
    /// interception.
    pub fn with_bit_flip(mut self, p: f64) -> Result<Self, ConfigError> {
        validate_prob(p)?;
        self.bit_flip = p;
        Ok(self)
    }

    /// Re-checks a channel that may have been built field by field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_prob(self.bit_flip)
    }

    /// Sends the prepared photons down the fiber.
    ///
    /// Undisturbed, the receiver gets the sender's bits and bases as they were
    /// prepared. Intercepted, the eavesdropper picks its own random basis per
    /// photon, measures, and forwards a fresh photon encoding what it measured
    /// in the basis it used.
    ///
    /// # Returns
    ///
    /// The photons reaching the receiver, or a `ProtocolError` if the sender's
    /// bits and bases differ in length.
    pub fn transmit<R: RandomSource + ?Sized>(
        &self,
        bits: &[bool],
        bases: &[Basis],
        rng: &mut R,
    ) -> Result<Transmission, ProtocolError> {
        ensure_same_length(
            Stage::Transmitted,
            ("sender bits", bits.len()),
            ("sender bases", bases.len()),
        )?;

        let mut in_fiber = bits.to_vec();
        if self.bit_flip > 1e-12 {
            let mut flipped = 0usize;
            for bit in in_fiber.iter_mut() {
                if rng.random_event(self.bit_flip) {
                    *bit = !*bit;
                    flipped += 1;
                }
            }
            debug!(flipped, p = self.bit_flip, "Fiber noise applied");
        }

        if !self.intercept {
            return Ok(Transmission {
                bits: in_fiber,
                bases: bases.to_vec(),
                interception: None,
            });
        }

        // Eavesdropper intercepts
        let eve_bases = rng.random_bases(bits.len());
        let eve_bits: Vec<bool> = in_fiber
            .iter()
            .zip(bases)
            .zip(&eve_bases)
            .map(|((&bit, &basis), &eve_basis)| measure(bit, basis, eve_basis, rng))
            .collect();

        debug!(photons = eve_bits.len(), "Eavesdropper intercepted the channel");

        Ok(Transmission {
            bits: eve_bits.clone(),
            bases: eve_bases.clone(),
            interception: Some(Interception {
                bases: eve_bases,
                measured_bits: eve_bits,
            }),
        })
    }
}

/// What comes out of the receiver's end of the fiber.
#[derive(Clone, Debug, PartialEq)]
pub struct Transmission {
    /// Bit carried by each arriving photon.
    pub bits: Vec<bool>,
    /// Basis each arriving photon is encoded in.
    pub bases: Vec<Basis>,
    /// The eavesdropper's record, if one was on the line.
    pub interception: Option<Interception>,
}

impl Transmission {
    pub fn was_intercepted(&self) -> bool {
        self.interception.is_some()
    }
}

/// The eavesdropper's bases and measurement results.
#[derive(Clone, Debug, PartialEq)]
pub struct Interception {
    pub bases: Vec<Basis>,
    pub measured_bits: Vec<bool>,
}

/// Validate probability parameter
fn validate_prob(p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::InvalidProbability(p));
    }
    Ok(())
}
