//! Control block derivation for single-leaf taproot trees.
//!
//! Vault outputs commit exactly one script path, so the merkle branch is
//! empty and the control block is 33 bytes: the leaf version byte with the
//! output-key parity bit, followed by the untweaked internal key.

use bitcoin::{
    taproot::{ControlBlock, LeafVersion, TaprootBuilder, TaprootSpendInfo},
    ScriptBuf, XOnlyPublicKey,
};
use secp256k1::SECP256K1;

use crate::errors::ControlBlockError;

/// Spend info for a tree holding `leaf_script` as its only leaf, committed
/// under `internal_key`.
pub fn single_leaf_spend_info(
    internal_key: XOnlyPublicKey,
    leaf_script: &ScriptBuf,
) -> Result<TaprootSpendInfo, ControlBlockError> {
    TaprootBuilder::new()
        .add_leaf(0, leaf_script.clone())?
        .finalize(SECP256K1, internal_key)
        .map_err(|_| ControlBlockError::TaprootFinalize)
}

/// The control block revealing `leaf_script` in a script-path spend of the
/// single-leaf tree under `internal_key`.
pub fn single_leaf_control_block(
    internal_key: XOnlyPublicKey,
    leaf_script: &ScriptBuf,
) -> Result<ControlBlock, ControlBlockError> {
    let spend_info = single_leaf_spend_info(internal_key, leaf_script)?;
    spend_info
        .control_block(&(leaf_script.clone(), LeafVersion::TapScript))
        .ok_or(ControlBlockError::MissingControlBlock)
}

#[cfg(test)]
mod tests {
    use bitcoin::Network;
    use tbv_primitives::engine::ScriptEngine;
    use tbv_test_utils::{test_role_keys, TestScriptEngine};

    use super::*;

    fn payout_leaf() -> (XOnlyPublicKey, ScriptBuf) {
        let leaf = TestScriptEngine
            .create_payout_script(&test_role_keys(), Network::Regtest)
            .unwrap();
        (leaf.internal_key, leaf.script)
    }

    #[test]
    fn single_leaf_control_block_is_33_bytes() {
        let (internal_key, script) = payout_leaf();
        let control_block = single_leaf_control_block(internal_key, &script).unwrap();
        let serialized = control_block.serialize();

        assert_eq!(serialized.len(), 33);
        // Leaf version with the parity bit in the low bit.
        assert!(serialized[0] == 0xc0 || serialized[0] == 0xc1);
        assert_eq!(&serialized[1..], internal_key.serialize().as_slice());
        assert!(control_block.merkle_branch.is_empty());
    }

    #[test]
    fn control_block_verifies_against_output_key() {
        let (internal_key, script) = payout_leaf();
        let spend_info = single_leaf_spend_info(internal_key, &script).unwrap();
        let control_block = single_leaf_control_block(internal_key, &script).unwrap();

        assert!(control_block.verify_taproot_commitment(
            SECP256K1,
            spend_info.output_key().to_inner(),
            &script,
        ));
    }
}
