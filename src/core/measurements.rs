use crate::core::errors::{ProtocolError, ensure_same_length};
use crate::core::{Basis, RandomSource, Stage};

/// Measures a single photon.
///
/// A photon prepared as `bit` in `prepared_basis` and read in the same basis
/// collapses deterministically back to `bit`. Read in the conjugate basis the
/// outcome is a fair coin independent of `bit`, and only that branch draws
/// from `rng`.
///
/// # Arguments
///
/// * `bit` - The bit encoded on the photon.
/// * `prepared_basis` - The basis the photon was prepared in.
/// * `measurement_basis` - The basis of the measuring device.
/// * `rng` - Randomness for the mismatched-basis outcome.
pub fn measure<R: RandomSource + ?Sized>(
    bit: bool,
    prepared_basis: Basis,
    measurement_basis: Basis,
    rng: &mut R,
) -> bool {
    if prepared_basis == measurement_basis {
        bit
    } else {
        rng.random_bit()
    }
}

/// Measures a whole train of photons, position by position.
///
/// # Returns
///
/// The measured bits, or a `ProtocolError` if the three sequences differ in
/// length.
pub fn measure_all<R: RandomSource + ?Sized>(
    bits: &[bool],
    prepared_bases: &[Basis],
    measurement_bases: &[Basis],
    rng: &mut R,
) -> Result<Vec<bool>, ProtocolError> {
    ensure_same_length(
        Stage::Measured,
        ("photon bits", bits.len()),
        ("photon bases", prepared_bases.len()),
    )?;
    ensure_same_length(
        Stage::Measured,
        ("photon bases", prepared_bases.len()),
        ("measurement bases", measurement_bases.len()),
    )?;

    let results = bits
        .iter()
        .zip(prepared_bases)
        .zip(measurement_bases)
        .map(|((&bit, &prepared), &measuring)| measure(bit, prepared, measuring, rng))
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn test_same_basis_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);

        for basis in Basis::ALL {
            for bit in [false, true] {
                for _ in 0..100 {
                    assert_eq!(measure(bit, basis, basis, &mut rng), bit);
                }
            }
        }
    }

    #[test]
    fn test_same_basis_consumes_no_randomness() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut untouched = rng.clone();

        measure(true, Basis::Diagonal, Basis::Diagonal, &mut rng);

        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_wrong_basis_is_a_fair_coin() {
        let mut rng = StdRng::seed_from_u64(3);
        let trials = 10_000;

        for bit in [false, true] {
            let ones = (0..trials)
                .filter(|_| measure(bit, Basis::Rectilinear, Basis::Diagonal, &mut rng))
                .count();
            let share = ones as f64 / trials as f64;

            assert!((0.45..=0.55).contains(&share), "bit {bit}: share {share}");
        }
    }

    #[test]
    fn test_measure_all_rejects_ragged_input() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = measure_all(
            &[true, false],
            &[Basis::Rectilinear, Basis::Diagonal],
            &[Basis::Rectilinear],
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ProtocolError::LengthMismatch {
                stage: Stage::Measured,
                left: 2,
                right: 1,
                ..
            }
        ));
    }
}
