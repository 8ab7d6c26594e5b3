//! Turns an unfunded template plus selected UTXOs into a signable
//! transaction.

use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};
use tbv_primitives::{constants::BITCOIN_DUST_LIMIT, utxo::Utxo};
use tracing::debug;

use crate::template::UnfundedTemplate;

/// An input spending `previous_output` with empty signature fields, ready
/// for PSBT-based signing.
pub(crate) fn unsigned_txin(previous_output: OutPoint) -> TxIn {
    TxIn {
        previous_output,
        script_sig: ScriptBuf::new(),
        sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
        witness: Witness::new(),
    }
}

/// Attaches `utxos` as inputs to `template` and appends a change output
/// when `change_amount` clears the dust limit. Template outputs keep their
/// positions, so the vault output stays at index 0. Inputs are added in
/// selection order.
pub fn fund_template(
    template: &UnfundedTemplate,
    utxos: &[Utxo],
    change_script: ScriptBuf,
    change_amount: Amount,
) -> Transaction {
    let input = utxos
        .iter()
        .map(|utxo| unsigned_txin(utxo.outpoint()))
        .collect();

    let mut output = template.outputs.clone();
    if change_amount.to_sat() > BITCOIN_DUST_LIMIT {
        output.push(TxOut {
            value: change_amount,
            script_pubkey: change_script,
        });
    } else if change_amount > Amount::ZERO {
        debug!(%change_amount, "folding sub-dust change into the fee");
    }

    Transaction {
        version: template.version,
        lock_time: template.lock_time,
        input,
        output,
    }
}
