//! PSBT construction for vault payout spends.
//!
//! Payout and PayoutOptimistic transactions both spend two outputs: the
//! vault output of the peg-in at input 0 and a connector output of a
//! reference transaction (Assert for Payout, Claim for PayoutOptimistic)
//! at input 1. Input 0 is a taproot script-path spend of the payout leaf,
//! so its PSBT entry carries the witness UTXO, the untweaked internal key,
//! and the leaf script with its control block. Input 1 only needs its
//! witness UTXO here; the connector spend is finalized elsewhere.
//!
//! Both prevouts are attached because the default taproot sighash commits
//! to every spent output; signers cannot produce a valid signature for
//! input 0 without also seeing input 1's prevout.

use bitcoin::{
    psbt::Psbt,
    taproot::LeafVersion,
    Network, Transaction,
};
use tbv_primitives::{engine::ScriptEngine, keys::VaultRoleKeys};
use tracing::debug;

use crate::{
    errors::{Mismatch, PayoutStructureError},
    fund::unsigned_txin,
    taproot::single_leaf_control_block,
};

/// Output index of the vault output in the peg-in transaction.
pub const PEGIN_VAULT_VOUT: u32 = 0;

/// Output index of the connector output in the reference transaction.
pub const REFERENCE_CONNECTOR_VOUT: u32 = 0;

/// Builds the signing PSBT for a Payout transaction, which spends the
/// vault output and a connector of the Assert transaction.
pub fn build_payout_psbt(
    engine: &impl ScriptEngine,
    keys: &VaultRoleKeys,
    network: Network,
    payout_tx: &Transaction,
    pegin_tx: &Transaction,
    assert_tx: &Transaction,
) -> Result<Psbt, PayoutStructureError> {
    build_vault_spend_psbt(engine, keys, network, payout_tx, pegin_tx, assert_tx)
}

/// Builds the signing PSBT for a PayoutOptimistic transaction, which
/// spends the vault output and a connector of the Claim transaction.
pub fn build_payout_optimistic_psbt(
    engine: &impl ScriptEngine,
    keys: &VaultRoleKeys,
    network: Network,
    payout_tx: &Transaction,
    pegin_tx: &Transaction,
    claim_tx: &Transaction,
) -> Result<Psbt, PayoutStructureError> {
    build_vault_spend_psbt(engine, keys, network, payout_tx, pegin_tx, claim_tx)
}

fn build_vault_spend_psbt(
    engine: &impl ScriptEngine,
    keys: &VaultRoleKeys,
    network: Network,
    payout_tx: &Transaction,
    pegin_tx: &Transaction,
    reference_tx: &Transaction,
) -> Result<Psbt, PayoutStructureError> {
    if payout_tx.input.len() != 2 {
        return Err(PayoutStructureError::WrongInputCount(Mismatch {
            expected: 2,
            got: payout_tx.input.len(),
        }));
    }

    let pegin_txid = pegin_tx.compute_txid();
    let reference_txid = reference_tx.compute_txid();

    let vault_prev = payout_tx.input[0].previous_output;
    if vault_prev.txid != pegin_txid {
        return Err(PayoutStructureError::WrongPeginTxid(Mismatch {
            expected: pegin_txid,
            got: vault_prev.txid,
        }));
    }
    if vault_prev.vout != PEGIN_VAULT_VOUT {
        return Err(PayoutStructureError::WrongPrevVout {
            input: 0,
            got: vault_prev.vout,
        });
    }

    let connector_prev = payout_tx.input[1].previous_output;
    if connector_prev.txid != reference_txid {
        return Err(PayoutStructureError::WrongReferenceTxid(Mismatch {
            expected: reference_txid,
            got: connector_prev.txid,
        }));
    }
    if connector_prev.vout != REFERENCE_CONNECTOR_VOUT {
        return Err(PayoutStructureError::WrongPrevVout {
            input: 1,
            got: connector_prev.vout,
        });
    }

    let vault_prevout = pegin_tx
        .output
        .get(PEGIN_VAULT_VOUT as usize)
        .ok_or(PayoutStructureError::MissingPrevOutput {
            txid: pegin_txid,
            vout: PEGIN_VAULT_VOUT,
        })?
        .clone();
    let connector_prevout = reference_tx
        .output
        .get(REFERENCE_CONNECTOR_VOUT as usize)
        .ok_or(PayoutStructureError::MissingPrevOutput {
            txid: reference_txid,
            vout: REFERENCE_CONNECTOR_VOUT,
        })?
        .clone();

    let leaf = engine.create_payout_script(keys, network)?;
    let control_block = single_leaf_control_block(leaf.internal_key, &leaf.script)?;

    // Psbt::from_unsigned_tx rejects populated signature fields, so the
    // inputs are rebuilt with their outpoints and sequences only.
    let mut unsigned = payout_tx.clone();
    for txin in &mut unsigned.input {
        let sequence = txin.sequence;
        *txin = unsigned_txin(txin.previous_output);
        txin.sequence = sequence;
    }

    let mut psbt = Psbt::from_unsigned_tx(unsigned)?;

    psbt.inputs[0].witness_utxo = Some(vault_prevout);
    psbt.inputs[0].tap_internal_key = Some(leaf.internal_key);
    psbt.inputs[0]
        .tap_scripts
        .insert(control_block, (leaf.script, LeafVersion::TapScript));

    psbt.inputs[1].witness_utxo = Some(connector_prevout);

    debug!(
        payout_txid = %payout_tx.compute_txid(),
        %pegin_txid,
        %reference_txid,
        "built vault spend psbt"
    );
    Ok(psbt)
}
