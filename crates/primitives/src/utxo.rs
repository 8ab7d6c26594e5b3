//! Spendable transaction outputs as reported by external sources.

use bitcoin::{Amount, OutPoint, ScriptBuf, Txid};
use serde::{Deserialize, Serialize};

/// An unspent output owned by the depositor's wallet. Immutable and
/// externally sourced; selection never mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Funding transaction id (big-endian display order at the hex boundary).
    pub txid: Txid,
    /// Output index within the funding transaction.
    pub vout: u32,
    /// Output value.
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub value: Amount,
    /// Locking script of the output.
    pub script_pubkey: ScriptBuf,
}

impl Utxo {
    pub fn new(txid: Txid, vout: u32, value: Amount, script_pubkey: ScriptBuf) -> Self {
        Self {
            txid,
            vout,
            value,
            script_pubkey,
        }
    }

    /// The outpoint this UTXO occupies.
    pub fn outpoint(&self) -> OutPoint {
        OutPoint {
            txid: self.txid,
            vout: self.vout,
        }
    }

    /// Whether the locking script is a standard output form we know how to
    /// spend. Anything else is skipped during selection.
    pub fn is_spendable(&self) -> bool {
        let spk = &self.script_pubkey;
        spk.is_p2tr() || spk.is_p2wpkh() || spk.is_p2wsh() || spk.is_p2pkh() || spk.is_p2sh()
    }
}
