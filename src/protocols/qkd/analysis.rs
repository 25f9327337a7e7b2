//! Quantum bit error rate estimation on the sifted key.

use crate::core::Stage;
use crate::core::errors::{ProtocolError, ensure_same_length};
use std::fmt;

/// Default QBER decision boundary, in percent.
///
/// Intercept-resend on every photon disturbs about 25% of the sifted bits, so
/// anything above this points to an eavesdropper or an unusably noisy line.
pub const QBER_THRESHOLD: f64 = 10.0;

/// Session classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Secure,
    Unsafe,
}

impl Verdict {
    /// `Unsafe` only when `qber` is strictly above `threshold`.
    pub fn classify(qber: f64, threshold: f64) -> Self {
        if qber > threshold {
            Verdict::Unsafe
        } else {
            Verdict::Secure
        }
    }

    pub fn is_secure(self) -> bool {
        self == Verdict::Secure
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Secure => f.write_str("SECURE"),
            Verdict::Unsafe => f.write_str("UNSAFE"),
        }
    }
}

/// Outcome of comparing the two sifted keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorAnalysis {
    pub sifted_length: usize,
    pub errors: usize,
    /// Error rate in percent, 0 when nothing survived sifting.
    pub qber: f64,
    pub verdict: Verdict,
}

/// Counts disagreements between the sifted keys and classifies the session.
///
/// # Returns
///
/// The error statistics, or a `ProtocolError` if the keys differ in length.
/// Sifting never produces such keys, so that error means a broken pipeline.
pub fn analyze(
    sender_key: &[bool],
    receiver_key: &[bool],
    threshold: f64,
) -> Result<ErrorAnalysis, ProtocolError> {
    ensure_same_length(
        Stage::Analyzed,
        ("sifted sender key", sender_key.len()),
        ("sifted receiver key", receiver_key.len()),
    )?;

    let sifted_length = sender_key.len();
    let errors = sender_key
        .iter()
        .zip(receiver_key)
        .filter(|(a, b)| a != b)
        .count();

    let qber = if sifted_length > 0 {
        (errors as f64 / sifted_length as f64) * 100.0
    } else {
        0.0
    };

    Ok(ErrorAnalysis {
        sifted_length,
        errors,
        qber,
        verdict: Verdict::classify(qber, threshold),
    })
}
