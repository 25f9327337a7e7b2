use crate::core::RandomSource;
use crate::core::errors::ProtocolError;
use crate::protocols::bb84::{self, SessionConfig};
use crate::protocols::qkd::analysis::Verdict;
use std::fmt;
use tracing::info;

/// Runs many BB84 sessions and aggregates their error statistics.
///
/// A single session of a few hundred photons gives a noisy QBER; sampling
/// repeated sessions shows where the rate actually settles for a given
/// channel.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    /// Configuration shared by every sampled session.
    pub config: SessionConfig,
}

impl Sampler {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Runs `num_sessions` independent sessions drawing from `rng`.
    ///
    /// # Returns
    ///
    /// A `QberSummary` over all sessions, or the first `ProtocolError` a
    /// session raised.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        num_sessions: usize,
        rng: &mut R,
    ) -> Result<QberSummary, ProtocolError> {
        let mut summary = QberSummary {
            intercepted: self.config.channel.intercept,
            ..QberSummary::default()
        };

        for _ in 0..num_sessions {
            let result = bb84::run(&self.config, rng)?;
            summary.record(result.qber(), result.analysis.sifted_length, result.errors());
            if result.verdict() == Verdict::Unsafe {
                summary.unsafe_sessions += 1;
            }
        }

        info!(
            sessions = summary.sessions,
            mean_qber = summary.mean_qber,
            pooled_qber = summary.pooled_qber(),
            unsafe_sessions = summary.unsafe_sessions,
            "Sampling complete"
        );

        Ok(summary)
    }
}

/// Aggregate QBER statistics over sampled sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QberSummary {
    pub intercepted: bool,
    pub sessions: usize,
    pub unsafe_sessions: usize,
    pub total_sifted: usize,
    pub total_errors: usize,
    pub mean_qber: f64,
    pub min_qber: f64,
    pub max_qber: f64,
}

impl QberSummary {
    fn record(&mut self, qber: f64, sifted: usize, errors: usize) {
        if self.sessions == 0 {
            self.min_qber = qber;
            self.max_qber = qber;
        } else {
            self.min_qber = self.min_qber.min(qber);
            self.max_qber = self.max_qber.max(qber);
        }
        self.sessions += 1;
        // Running mean
        self.mean_qber += (qber - self.mean_qber) / self.sessions as f64;
        self.total_sifted += sifted;
        self.total_errors += errors;
    }

    /// Error rate over all sifted bits of all sessions, in percent.
    pub fn pooled_qber(&self) -> f64 {
        if self.total_sifted > 0 {
            (self.total_errors as f64 / self.total_sifted as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for QberSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.intercepted {
            "WITH EAVESDROPPER (EVE)"
        } else {
            "SECURE CHANNEL"
        };
        writeln!(f, "Sampled {} sessions: {}", self.sessions, mode)?;
        writeln!(
            f,
            "   QBER mean/min/max: {:.2}% / {:.2}% / {:.2}%",
            self.mean_qber, self.min_qber, self.max_qber
        )?;
        writeln!(
            f,
            "   Pooled QBER:       {:.2}% ({} errors in {} sifted bits)",
            self.pooled_qber(),
            self.total_errors,
            self.total_sifted
        )?;
        write!(
            f,
            "   Flagged UNSAFE:    {} of {}",
            self.unsafe_sessions, self.sessions
        )
    }
}
