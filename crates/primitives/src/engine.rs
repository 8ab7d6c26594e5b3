//! Contract with the external script-generation engine.
//!
//! The engine owns all taproot script logic for the vault protocol; this
//! crate only consumes the artifacts it publishes. The engine runs in
//! process, so the seam is a plain synchronous trait.

use bitcoin::{Amount, Network, ScriptBuf, Transaction, Txid, XOnlyPublicKey};

use crate::{errors::EngineError, keys::VaultRoleKeys};

/// Parameters for requesting an unfunded peg-in transaction.
#[derive(Debug, Clone)]
pub struct PeginSpec {
    /// Signer roles committed into the vault's script paths.
    pub keys: VaultRoleKeys,
    /// Amount locked into the vault output.
    pub amount: Amount,
    /// Target network.
    pub network: Network,
}

/// Everything the engine publishes about a freshly created peg-in. The
/// builder republishes these unchanged.
#[derive(Debug, Clone)]
pub struct PeginArtifacts {
    /// Unfunded transaction (zero inputs, vault output at index 0).
    pub tx: Transaction,
    /// Id of the unfunded transaction.
    pub txid: Txid,
    /// Locking script of the vault output.
    pub vault_script_pubkey: ScriptBuf,
    /// Value of the vault output.
    pub vault_value: Amount,
}

/// The single payout leaf revealed in a script-path spend, plus the internal
/// key it is committed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutLeaf {
    /// Tapscript leaf bytes.
    pub script: ScriptBuf,
    /// Untweaked internal key of the vault output.
    pub internal_key: XOnlyPublicKey,
}

/// External script-generation engine.
pub trait ScriptEngine {
    /// Creates an unfunded peg-in transaction locking `spec.amount` into a
    /// vault controlled by `spec.keys`.
    fn create_pegin_transaction(&self, spec: &PeginSpec) -> Result<PeginArtifacts, EngineError>;

    /// Returns the payout leaf script and internal key for the vault output
    /// committed to `keys`.
    fn create_payout_script(
        &self,
        keys: &VaultRoleKeys,
        network: Network,
    ) -> Result<PayoutLeaf, EngineError>;
}
