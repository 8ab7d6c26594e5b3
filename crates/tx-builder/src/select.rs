//! Largest-first UTXO selection with a fixed-size fee model.
//!
//! Selection is deterministic: candidates are sorted by value descending
//! (stable, so equal-value UTXOs keep their input order) and accumulated
//! until they cover the target plus the projected fee. Fees are estimated
//! from fixed per-component virtual sizes rather than measured from
//! serialized transactions, which keeps the result independent of script
//! contents and lets callers precompute txids before signing.

use bitcoin::Amount;
use tbv_primitives::{constants::BITCOIN_DUST_LIMIT, utxo::Utxo};
use tracing::{debug, warn};

use crate::errors::SelectionError;

/// Assumed virtual size of one spend input (outpoint, sequence, and a
/// taproot-sized witness).
pub const INPUT_VBYTES: u64 = 58;

/// Assumed virtual size of one output.
pub const OUTPUT_VBYTES: u64 = 43;

/// Fixed transaction overhead (version, locktime, counts, segwit marker).
pub const TX_OVERHEAD_VBYTES: u64 = 11;

/// Flat buffer added at low fee rates, where rounding in the vbyte model
/// can otherwise undershoot the relay floor.
pub const LOW_RATE_BUFFER_SATS: u64 = 30;

/// Fee rates at or below this (sat/vB) get [`LOW_RATE_BUFFER_SATS`] added.
pub const LOW_RATE_THRESHOLD: u64 = 2;

/// Outcome of a successful selection round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoSelection {
    /// Chosen inputs, largest first.
    pub utxos: Vec<Utxo>,
    /// Combined value of the chosen inputs.
    pub total_value: Amount,
    /// Fee reserved for the funded transaction.
    pub fee: Amount,
    /// Value left over for a change output. May be at or below the dust
    /// limit, in which case funding folds it into the fee.
    pub change_amount: Amount,
}

/// Projected fee for spending `n_inputs` inputs at `fee_rate` sat/vB into
/// one payment output, plus a change output when the leftover would clear
/// the dust limit.
fn projected_fee(n_inputs: u64, fee_rate: u64, accumulated: u64, target: u64) -> u64 {
    // Saturating throughout: a pathological fee rate then fails selection
    // as insufficient instead of wrapping.
    let mut fee = n_inputs
        .saturating_mul(INPUT_VBYTES)
        .saturating_add(OUTPUT_VBYTES + TX_OVERHEAD_VBYTES)
        .saturating_mul(fee_rate);
    if fee_rate <= LOW_RATE_THRESHOLD {
        fee = fee.saturating_add(LOW_RATE_BUFFER_SATS);
    }
    let projected_change = accumulated.saturating_sub(target).saturating_sub(fee);
    if projected_change > BITCOIN_DUST_LIMIT {
        fee = fee.saturating_add(OUTPUT_VBYTES.saturating_mul(fee_rate));
    }
    fee
}

/// Selects UTXOs covering `target` plus fees at `fee_rate` sat/vB.
///
/// Non-standard outputs in `candidates` are skipped. The same candidate
/// set, target, and rate always select the same inputs in the same order.
pub fn select_utxos(
    candidates: &[Utxo],
    target: Amount,
    fee_rate: u64,
) -> Result<UtxoSelection, SelectionError> {
    if candidates.is_empty() {
        return Err(SelectionError::NoUtxos);
    }
    if target == Amount::ZERO {
        return Err(SelectionError::ZeroTarget);
    }
    if fee_rate == 0 {
        return Err(SelectionError::ZeroFeeRate);
    }

    let mut spendable: Vec<&Utxo> = Vec::with_capacity(candidates.len());
    for utxo in candidates {
        if utxo.is_spendable() {
            spendable.push(utxo);
        } else {
            warn!(txid = %utxo.txid, vout = utxo.vout, "skipping non-standard UTXO");
        }
    }
    if spendable.is_empty() {
        return Err(SelectionError::NoSpendableUtxos);
    }

    // Stable sort keeps equal-value candidates in their supplied order.
    spendable.sort_by(|a, b| b.value.cmp(&a.value));

    let target_sats = target.to_sat();
    let mut chosen: Vec<Utxo> = Vec::new();
    let mut accumulated = 0u64;
    let mut fee = 0u64;

    for utxo in &spendable {
        chosen.push((*utxo).clone());
        accumulated = accumulated.saturating_add(utxo.value.to_sat());
        fee = projected_fee(chosen.len() as u64, fee_rate, accumulated, target_sats);
        let needed = target_sats.saturating_add(fee);
        if accumulated >= needed {
            let change = accumulated - needed;
            debug!(
                inputs = chosen.len(),
                total = accumulated,
                fee,
                change,
                "selected UTXOs"
            );
            return Ok(UtxoSelection {
                utxos: chosen,
                total_value: Amount::from_sat(accumulated),
                fee: Amount::from_sat(fee),
                change_amount: Amount::from_sat(change),
            });
        }
    }

    Err(SelectionError::InsufficientFunds {
        needed: target_sats.saturating_add(fee),
        available: accumulated,
    })
}
