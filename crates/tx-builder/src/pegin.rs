//! Peg-in creation entry point.

use tbv_primitives::{
    engine::{PeginArtifacts, PeginSpec, ScriptEngine},
    errors::EngineError,
};
use tracing::debug;

/// Requests an unfunded peg-in transaction from the script engine.
///
/// The engine owns the vault's taproot commitment; the artifacts come back
/// unmodified so the txid callers see is exactly the one the engine
/// computed.
pub fn create_pegin_transaction(
    engine: &impl ScriptEngine,
    spec: &PeginSpec,
) -> Result<PeginArtifacts, EngineError> {
    let artifacts = engine.create_pegin_transaction(spec)?;
    debug!(
        txid = %artifacts.txid,
        vault_value = %artifacts.vault_value,
        "created unfunded peg-in transaction"
    );
    Ok(artifacts)
}
