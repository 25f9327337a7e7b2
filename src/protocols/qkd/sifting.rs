//! Basis reconciliation.
//!
//! After measuring, sender and receiver publicly compare bases (never bits)
//! and keep only the positions where they agreed.

use crate::core::errors::{ProtocolError, ensure_same_length};
use crate::core::{Basis, Stage};

/// Key material left after sifting. Both keys always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiftedKeys {
    /// Sender's bits at matching-basis positions.
    pub sender: Vec<bool>,
    /// Receiver's results at the same positions.
    pub receiver: Vec<bool>,
    /// Original positions that were kept, in increasing order.
    pub indices: Vec<usize>,
}

impl SiftedKeys {
    pub fn len(&self) -> usize {
        self.sender.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }
}

/// Keeps the positions where both parties used the same basis.
///
/// # Arguments
///
/// * `sender_bits` - The bits the sender prepared.
/// * `sender_bases` - The bases the sender prepared them in.
/// * `receiver_bases` - The bases the receiver measured in.
/// * `receiver_results` - What the receiver measured.
///
/// # Returns
///
/// The sifted keys in original order, or a `ProtocolError` if any of the four
/// sequences has a different length.
pub fn sift(
    sender_bits: &[bool],
    sender_bases: &[Basis],
    receiver_bases: &[Basis],
    receiver_results: &[bool],
) -> Result<SiftedKeys, ProtocolError> {
    let n = sender_bits.len();
    ensure_same_length(
        Stage::Sifted,
        ("sender bits", n),
        ("sender bases", sender_bases.len()),
    )?;
    ensure_same_length(
        Stage::Sifted,
        ("sender bases", n),
        ("receiver bases", receiver_bases.len()),
    )?;
    ensure_same_length(
        Stage::Sifted,
        ("receiver bases", n),
        ("receiver results", receiver_results.len()),
    )?;

    let mut keys = SiftedKeys::default();
    for i in 0..n {
        if sender_bases[i] == receiver_bases[i] {
            keys.sender.push(sender_bits[i]);
            keys.receiver.push(receiver_results[i]);
            keys.indices.push(i);
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Basis::{Diagonal as X, Rectilinear as Z};
    use crate::core::{QuantumChannel, measure_all};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_keeps_only_matching_positions() {
        let keys = sift(
            &[false, true, true, false, true],
            &[Z, Z, X, X, Z],
            &[Z, X, X, Z, Z],
            &[false, false, true, true, false],
        )
        .unwrap();

        assert_eq!(keys.indices, vec![0, 2, 4]);
        assert_eq!(keys.sender, vec![false, true, true]);
        assert_eq!(keys.receiver, vec![false, true, false]);
    }

    #[test]
    fn test_no_matching_bases_gives_empty_keys() {
        let keys = sift(&[true, false], &[Z, X], &[X, Z], &[true, true]).unwrap();

        assert!(keys.is_empty());
        assert_eq!(keys.receiver.len(), 0);
    }

    #[test]
    fn test_length_mismatch_names_the_sequences() {
        let err = sift(&[true, false], &[Z, X], &[X], &[true, true]).unwrap_err();

        assert_eq!(
            err,
            ProtocolError::LengthMismatch {
                stage: Stage::Sifted,
                left_name: "sender bases",
                left: 2,
                right_name: "receiver bases",
                right: 1,
            }
        );
    }

    fn basis_strategy() -> impl Strategy<Value = Basis> {
        prop_oneof![Just(Basis::Rectilinear), Just(Basis::Diagonal)]
    }

    fn session_strategy() -> impl Strategy<Value = (Vec<bool>, Vec<Basis>, Vec<Basis>, Vec<bool>)>
    {
        (0usize..128).prop_flat_map(|n| {
            (
                prop::collection::vec(any::<bool>(), n),
                prop::collection::vec(basis_strategy(), n),
                prop::collection::vec(basis_strategy(), n),
                prop::collection::vec(any::<bool>(), n),
            )
        })
    }

    proptest! {
        #[test]
        fn sifted_keys_partition_positions((bits, a_bases, b_bases, results) in session_strategy()) {
            let keys = sift(&bits, &a_bases, &b_bases, &results).unwrap();

            prop_assert_eq!(keys.sender.len(), keys.receiver.len());
            prop_assert_eq!(keys.indices.len(), keys.sender.len());
            prop_assert!(keys.len() <= bits.len());

            for i in 0..bits.len() {
                prop_assert_eq!(keys.indices.contains(&i), a_bases[i] == b_bases[i]);
            }
            for (k, &i) in keys.indices.iter().enumerate() {
                prop_assert_eq!(keys.sender[k], bits[i]);
                prop_assert_eq!(keys.receiver[k], results[i]);
            }
        }

        #[test]
        fn undisturbed_receiver_sifts_to_senders_key(
            (bits, a_bases, b_bases, _r) in session_strategy(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let arrived = QuantumChannel::undisturbed()
                .transmit(&bits, &a_bases, &mut rng)
                .unwrap();
            let results = measure_all(&arrived.bits, &arrived.bases, &b_bases, &mut rng).unwrap();
            let keys = sift(&bits, &a_bases, &b_bases, &results).unwrap();

            prop_assert_eq!(keys.sender, keys.receiver);
        }
    }
}
