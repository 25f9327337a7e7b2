use crate::core::Stage;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Session length must be a positive number of qubits")]
    ZeroLength,

    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),

    #[error("Invalid QBER threshold: {0}. Must be a percentage between 0.0 and 100.0")]
    InvalidThreshold(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error(
        "Invariant violated entering {stage}: {left_name} has {left} entries but {right_name} has {right}"
    )]
    LengthMismatch {
        stage: Stage,
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Checks that two per-position sequences line up before a stage consumes them.
pub(crate) fn ensure_same_length(
    stage: Stage,
    (left_name, left): (&'static str, usize),
    (right_name, right): (&'static str, usize),
) -> Result<(), ProtocolError> {
    if left != right {
        return Err(ProtocolError::LengthMismatch {
            stage,
            left_name,
            left,
            right_name,
            right,
        });
    }
    Ok(())
}
