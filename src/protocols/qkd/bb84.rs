//! BB84 Quantum Key Distribution Protocol.
//!
//! Bennett and Brassard's 1984 protocol. The sender encodes random bits in
//! randomly chosen conjugate bases, the receiver measures in bases of its own
//! choosing, and both keep only the positions where the bases agreed. An
//! eavesdropper who measures in transit must guess the basis and disturbs
//! about a quarter of the sifted bits, which shows up in the error rate.

use crate::core::errors::{ConfigError, ProtocolError};
use crate::core::{Basis, Interception, QuantumChannel, RandomSource, Stage, measure_all};
use crate::protocols::qkd::analysis::{ErrorAnalysis, QBER_THRESHOLD, Verdict, analyze};
use crate::protocols::qkd::sifting::{SiftedKeys, sift};
use tracing::{debug, info, warn};

/// Session length used when none is given.
pub const DEFAULT_NUM_BITS: usize = 50;

/// Parameters of a single BB84 session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Number of photons the sender prepares.
    pub num_bits: usize,
    /// The fiber and whoever is listening on it.
    pub channel: QuantumChannel,
    /// QBER (percent) above which the session is declared unsafe.
    pub qber_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_bits: DEFAULT_NUM_BITS,
            channel: QuantumChannel::undisturbed(),
            qber_threshold: QBER_THRESHOLD,
        }
    }
}

impl SessionConfig {
    /// Creates a session of `num_bits` photons over an undisturbed channel.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroLength` if `num_bits` is 0.
    pub fn new(num_bits: usize) -> Result<Self, ConfigError> {
        if num_bits == 0 {
            return Err(ConfigError::ZeroLength);
        }
        Ok(Self {
            num_bits,
            ..Self::default()
        })
    }

    /// sets the quantum channel for the session.
    pub fn with_channel(mut self, channel: QuantumChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Shorthand for toggling the eavesdropper on the current channel.
    pub fn with_eavesdropper(mut self, intercept: bool) -> Self {
        self.channel.intercept = intercept;
        self
    }

    pub fn with_qber_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        validate_threshold(threshold)?;
        self.qber_threshold = threshold;
        Ok(self)
    }

    /// Checks every field, including ones set directly rather than through
    /// the builders.
    ///
    /// # Errors
    ///
    /// `ZeroLength`, `InvalidProbability` for the channel noise, or
    /// `InvalidThreshold` (NaN included).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_bits == 0 {
            return Err(ConfigError::ZeroLength);
        }
        self.channel.validate()?;
        validate_threshold(self.qber_threshold)
    }
}

fn validate_threshold(threshold: f64) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err(ConfigError::InvalidThreshold(threshold));
    }
    Ok(())
}

/// BB84 results
#[derive(Clone, Debug, PartialEq)]
pub struct Bb84Result {
    pub raw_length: usize,
    pub alice_bits: Vec<bool>,
    pub alice_bases: Vec<Basis>,
    /// Eavesdropper's record, present only on an intercepted channel.
    pub eve: Option<Interception>,
    pub bob_bases: Vec<Basis>,
    pub bob_results: Vec<bool>,
    pub sifted: SiftedKeys,
    pub analysis: ErrorAnalysis,
}

impl Bb84Result {
    pub fn was_intercepted(&self) -> bool {
        self.eve.is_some()
    }

    pub fn errors(&self) -> usize {
        self.analysis.errors
    }

    pub fn qber(&self) -> f64 {
        self.analysis.qber
    }

    pub fn verdict(&self) -> Verdict {
        self.analysis.verdict
    }

    /// The shared key, released only when the session was judged secure.
    pub fn final_key(&self) -> Option<&[bool]> {
        self.analysis
            .verdict
            .is_secure()
            .then_some(self.sifted.sender.as_slice())
    }
}

/// Runs BB84 protocol
///
/// Prepares `config.num_bits` photons, sends them over `config.channel`,
/// measures them in random bases, sifts, and estimates the QBER. All
/// randomness is drawn from `rng`, in that order.
pub fn run<R: RandomSource + ?Sized>(
    config: &SessionConfig,
    rng: &mut R,
) -> Result<Bb84Result, ProtocolError> {
    config.validate()?;
    let n = config.num_bits;
    let mut stage = Stage::Init;
    debug!(%stage, num_bits = n, intercept = config.channel.intercept, "Session started");

    // Alice prepares qubits
    let alice_bits = rng.random_bits(n);
    let alice_bases = rng.random_bases(n);

    // Alice sends qubits to Bob
    let transmission = config.channel.transmit(&alice_bits, &alice_bases, rng)?;
    stage = advance(stage);
    debug!(%stage, intercepted = transmission.was_intercepted());

    // Bob measures
    let bob_bases = rng.random_bases(n);
    let bob_results = measure_all(&transmission.bits, &transmission.bases, &bob_bases, rng)?;
    stage = advance(stage);
    debug!(%stage, photons = bob_results.len());

    // Sifting stage
    let sifted = sift(&alice_bits, &alice_bases, &bob_bases, &bob_results)?;
    stage = advance(stage);
    debug!(%stage, kept = sifted.len(), of = n);

    let analysis = analyze(&sifted.sender, &sifted.receiver, config.qber_threshold)?;
    stage = advance(stage);
    debug!(%stage, errors = analysis.errors);

    info!(
        num_bits = n,
        sifted = analysis.sifted_length,
        errors = analysis.errors,
        qber = analysis.qber,
        verdict = %analysis.verdict,
        "BB84 session complete"
    );
    if analysis.verdict == Verdict::Unsafe {
        warn!(
            qber = analysis.qber,
            threshold = config.qber_threshold,
            "QBER above threshold: eavesdropper or excessive noise"
        );
    }

    Ok(Bb84Result {
        raw_length: n,
        alice_bits,
        alice_bases,
        eve: transmission.interception,
        bob_bases,
        bob_results,
        sifted,
        analysis,
    })
}

/// Next pipeline stage. `run` never advances past `Analyzed`; reporting is
/// the caller's step.
fn advance(stage: Stage) -> Stage {
    stage.next().unwrap_or(Stage::Reported)
}
