//! Console narration of a BB84 session.

use crate::core::Basis;
use crate::protocols::bb84::Bb84Result;
use std::fmt;

/// How many leading positions the narration shows for each sequence.
pub const SAMPLE_LEN: usize = 10;

/// Step-by-step narration of a finished session.
pub struct Report<'a> {
    result: &'a Bb84Result,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a Bb84Result) -> Self {
        Self { result }
    }
}

fn bit_sample(bits: &[bool]) -> String {
    let shown: Vec<&str> = bits
        .iter()
        .take(SAMPLE_LEN)
        .map(|&b| if b { "1" } else { "0" })
        .collect();
    format!("[{}]...", shown.join(", "))
}

fn basis_sample(bases: &[Basis]) -> String {
    let shown: Vec<String> = bases.iter().take(SAMPLE_LEN).map(Basis::to_string).collect();
    format!("[{}]...", shown.join(", "))
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let rule = "=".repeat(60);
        let mode = if r.was_intercepted() {
            "WITH EAVESDROPPER (EVE)"
        } else {
            "SECURE CHANNEL"
        };

        writeln!(f, "{rule}")?;
        writeln!(f, "Starting Simulation: {mode}")?;
        writeln!(f, "{rule}")?;

        writeln!(f, "1. Alice prepares {} qubits.", r.raw_length)?;
        writeln!(f, "   Sample Bits:  {}", bit_sample(&r.alice_bits))?;
        writeln!(f, "   Sample Bases: {}", basis_sample(&r.alice_bases))?;
        writeln!(f)?;

        match &r.eve {
            Some(eve) => {
                writeln!(f, "2. [ALERT] Eve is intercepting the channel...")?;
                writeln!(f, "   Eve's Bases:   {}", basis_sample(&eve.bases))?;
                writeln!(f, "   Eve's Results: {}", bit_sample(&eve.measured_bits))?;
            }
            None => writeln!(f, "2. Photons travel through the fiber optic cable undisturbed.")?,
        }

        writeln!(f, "3. Bob measures received photons.")?;
        writeln!(f, "   Bob's Bases:   {}", basis_sample(&r.bob_bases))?;
        writeln!(f, "   Bob's Results: {}", bit_sample(&r.bob_results))?;
        writeln!(f)?;

        writeln!(f, "4. Sifting Phase Complete.")?;
        writeln!(
            f,
            "   Matching Bases: {} out of {} qubits.",
            r.sifted.len(),
            r.raw_length
        )?;
        writeln!(f)?;

        writeln!(f, "    FINAL REPORT ")?;
        writeln!(f, "Total Errors Found: {}", r.errors())?;
        writeln!(f, "Error Rate (QBER):  {:.2}%", r.qber())?;

        match r.final_key() {
            Some(key) => {
                writeln!(f, ">> CONCLUSION: SECURE! Key exchange successful.")?;
                write!(f, "   Final Key (First {SAMPLE_LEN}): {}", bit_sample(key))
            }
            None => write!(
                f,
                ">> CONCLUSION: UNSAFE! Eavesdropper detected or high noise."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::bb84::{SessionConfig, run};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_samples_are_truncated() {
        assert_eq!(bit_sample(&[true, false]), "[1, 0]...");
        assert_eq!(bit_sample(&[true; 25]).matches('1').count(), SAMPLE_LEN);
        assert_eq!(
            basis_sample(&[Basis::Rectilinear, Basis::Diagonal]),
            "[+, x]..."
        );
    }

    #[test]
    fn test_clean_report_shows_final_key() {
        let config = SessionConfig::new(100).unwrap();
        let result = run(&config, &mut StdRng::seed_from_u64(40)).unwrap();
        let text = Report::new(&result).to_string();

        assert!(text.contains("Starting Simulation: SECURE CHANNEL"));
        assert!(text.contains("undisturbed"));
        assert!(text.contains("Error Rate (QBER):  0.00%"));
        assert!(text.contains("CONCLUSION: SECURE!"));
        assert!(text.contains("Final Key (First 10)"));
    }

    #[test]
    fn test_intercepted_report_raises_alert() {
        let config = SessionConfig::new(2_000).unwrap().with_eavesdropper(true);
        let result = run(&config, &mut StdRng::seed_from_u64(41)).unwrap();
        let text = Report::new(&result).to_string();

        assert!(text.contains("WITH EAVESDROPPER (EVE)"));
        assert!(text.contains("[ALERT] Eve is intercepting"));
        assert!(text.contains("CONCLUSION: UNSAFE!"));
        assert!(!text.contains("Final Key"));
    }
}
