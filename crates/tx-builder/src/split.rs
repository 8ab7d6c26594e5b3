//! Splits wallet UTXOs into exact-value outputs for multi-vault deposits.
//!
//! A depositor opening several vaults at once needs one exactly-sized
//! UTXO per vault. The split transaction spends the wallet's inputs and
//! produces those denominations in one pass; the caller prices the fee by
//! leaving the difference between inputs and outputs unclaimed.

use bitcoin::{
    absolute::LockTime, psbt::Psbt, transaction::Version, Amount, ScriptBuf, Transaction, TxOut,
    Txid, XOnlyPublicKey,
};
use tbv_primitives::utxo::Utxo;
use tracing::debug;

use crate::{
    errors::{Mismatch, SplitError},
    fund::unsigned_txin,
};

/// One requested split output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRecipient {
    /// Locking script of the output.
    pub script_pubkey: ScriptBuf,
    /// Exact output value.
    pub amount: Amount,
}

/// An unsigned split transaction with its precomputed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTransaction {
    /// The unsigned transaction.
    pub tx: Transaction,
    /// Id of the unsigned transaction; stable under signing, so peg-ins
    /// can reference the split outputs before any signature exists.
    pub txid: Txid,
}

/// Builds an unsigned transaction spending `utxos` into one output per
/// recipient, in the order given.
pub fn build_split_transaction(
    utxos: &[Utxo],
    recipients: &[SplitRecipient],
) -> Result<SplitTransaction, SplitError> {
    if utxos.is_empty() {
        return Err(SplitError::NoInputs);
    }
    if recipients.is_empty() {
        return Err(SplitError::NoRecipients);
    }

    let tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: utxos
            .iter()
            .map(|utxo| unsigned_txin(utxo.outpoint()))
            .collect(),
        output: recipients
            .iter()
            .map(|r| TxOut {
                value: r.amount,
                script_pubkey: r.script_pubkey.clone(),
            })
            .collect(),
    };
    let txid = tx.compute_txid();
    debug!(%txid, inputs = utxos.len(), outputs = recipients.len(), "built split transaction");

    Ok(SplitTransaction { tx, txid })
}

/// Wraps a split transaction in a signing PSBT.
///
/// Every input must be a taproot output owned by the wallet; each PSBT
/// input gets its witness UTXO and `internal_key` for key-path signing.
/// `utxos` must correspond 1:1, in order, with the transaction's inputs.
pub fn build_split_psbt(
    split: &SplitTransaction,
    utxos: &[Utxo],
    internal_key: XOnlyPublicKey,
) -> Result<Psbt, SplitError> {
    if utxos.len() != split.tx.input.len() {
        return Err(SplitError::InputCountMismatch(Mismatch {
            expected: split.tx.input.len(),
            got: utxos.len(),
        }));
    }
    for (index, (utxo, txin)) in utxos.iter().zip(&split.tx.input).enumerate() {
        if utxo.outpoint() != txin.previous_output {
            return Err(SplitError::OutpointMismatch {
                index,
                mismatch: Mismatch {
                    expected: txin.previous_output,
                    got: utxo.outpoint(),
                },
            });
        }
        if !utxo.script_pubkey.is_p2tr() {
            return Err(SplitError::NonTaprootInput { index });
        }
    }

    let mut psbt = Psbt::from_unsigned_tx(split.tx.clone())?;
    for (input, utxo) in psbt.inputs.iter_mut().zip(utxos) {
        input.witness_utxo = Some(TxOut {
            value: utxo.value,
            script_pubkey: utxo.script_pubkey.clone(),
        });
        input.tap_internal_key = Some(internal_key);
    }
    Ok(psbt)
}

#[cfg(test)]
mod tests {
    use bitcoin::key::TweakedPublicKey;
    use tbv_test_utils::{p2tr_utxo, test_role_keys, utxo_with_script, xonly_from_secret};

    use super::*;

    fn recipient(seed: u8, amount: u64) -> SplitRecipient {
        SplitRecipient {
            script_pubkey: ScriptBuf::new_p2tr_tweaked(TweakedPublicKey::dangerous_assume_tweaked(
                xonly_from_secret([seed; 32]),
            )),
            amount: Amount::from_sat(amount),
        }
    }

    #[test]
    fn splits_one_utxo_into_denominations() {
        let owner = *test_role_keys().depositor();
        let utxos = vec![p2tr_utxo(1, 100_000, owner)];
        let recipients = vec![recipient(0x31, 50_000), recipient(0x32, 45_000)];

        let split = build_split_transaction(&utxos, &recipients).unwrap();

        assert_eq!(split.tx.input.len(), 1);
        assert_eq!(split.tx.input[0].previous_output, utxos[0].outpoint());
        assert_eq!(split.tx.output.len(), 2);
        assert_eq!(split.tx.output[0].value, Amount::from_sat(50_000));
        assert_eq!(split.tx.output[1].value, Amount::from_sat(45_000));
        // The 5_000 sat shortfall is the fee.
        assert_eq!(split.txid, split.tx.compute_txid());
    }

    #[test]
    fn txid_is_stable_across_rebuilds() {
        let owner = *test_role_keys().depositor();
        let utxos = vec![p2tr_utxo(1, 100_000, owner), p2tr_utxo(2, 80_000, owner)];
        let recipients = vec![recipient(0x31, 170_000)];

        let a = build_split_transaction(&utxos, &recipients).unwrap();
        let b = build_split_transaction(&utxos, &recipients).unwrap();
        assert_eq!(a.txid, b.txid);
    }

    #[test]
    fn rejects_empty_inputs_and_recipients() {
        let owner = *test_role_keys().depositor();
        let utxos = vec![p2tr_utxo(1, 100_000, owner)];
        assert!(matches!(
            build_split_transaction(&[], &[recipient(0x31, 1_000)]),
            Err(SplitError::NoInputs)
        ));
        assert!(matches!(
            build_split_transaction(&utxos, &[]),
            Err(SplitError::NoRecipients)
        ));
    }

    #[test]
    fn psbt_carries_witness_utxo_and_internal_key() {
        let owner = *test_role_keys().depositor();
        let utxos = vec![p2tr_utxo(1, 100_000, owner), p2tr_utxo(2, 60_000, owner)];
        let recipients = vec![recipient(0x31, 150_000)];
        let split = build_split_transaction(&utxos, &recipients).unwrap();

        let psbt = build_split_psbt(&split, &utxos, owner).unwrap();

        assert_eq!(psbt.inputs.len(), 2);
        for (input, utxo) in psbt.inputs.iter().zip(&utxos) {
            let witness_utxo = input.witness_utxo.as_ref().unwrap();
            assert_eq!(witness_utxo.value, utxo.value);
            assert_eq!(witness_utxo.script_pubkey, utxo.script_pubkey);
            assert_eq!(input.tap_internal_key, Some(owner));
        }
    }

    #[test]
    fn psbt_rejects_mismatched_utxo_sets() {
        let owner = *test_role_keys().depositor();
        let utxos = vec![p2tr_utxo(1, 100_000, owner), p2tr_utxo(2, 60_000, owner)];
        let split =
            build_split_transaction(&utxos, &[recipient(0x31, 150_000)]).unwrap();

        let err = build_split_psbt(&split, &utxos[..1], owner).unwrap_err();
        assert!(matches!(err, SplitError::InputCountMismatch(_)));

        let swapped = vec![utxos[1].clone(), utxos[0].clone()];
        let err = build_split_psbt(&split, &swapped, owner).unwrap_err();
        assert!(matches!(err, SplitError::OutpointMismatch { index: 0, .. }));
    }

    #[test]
    fn psbt_rejects_non_taproot_inputs() {
        let owner = *test_role_keys().depositor();
        // P2WPKH output in place of the expected taproot input.
        let mut p2wpkh = vec![0x00, 0x14];
        p2wpkh.extend_from_slice(&[0xcd; 20]);
        let utxos = vec![utxo_with_script(1, 100_000, ScriptBuf::from_bytes(p2wpkh))];
        let split =
            build_split_transaction(&utxos, &[recipient(0x31, 90_000)]).unwrap();

        let err = build_split_psbt(&split, &utxos, owner).unwrap_err();
        assert!(matches!(err, SplitError::NonTaprootInput { index: 0 }));
    }
}
