use bitcoin::{
    absolute::LockTime,
    opcodes::all::{OP_CHECKSIG, OP_CHECKSIGADD, OP_CHECKSIGVERIFY, OP_NUMEQUAL},
    taproot::TaprootBuilder,
    transaction::Version,
    Address, Network, ScriptBuf, Transaction, TxOut, XOnlyPublicKey,
};
use secp256k1::SECP256K1;
use tbv_primitives::{
    constants::UNSPENDABLE_PUBLIC_KEY,
    engine::{PayoutLeaf, PeginArtifacts, PeginSpec, ScriptEngine},
    errors::EngineError,
    keys::VaultRoleKeys,
};

/// In-process stand-in for the production script engine.
///
/// Builds a single payout leaf (depositor and provider must sign, then an
/// n-of-n over keepers plus challengers) committed under the unspendable
/// internal key — the same observable shape the production engine publishes,
/// close enough to drive every builder end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestScriptEngine;

impl TestScriptEngine {
    fn payout_script(keys: &VaultRoleKeys) -> ScriptBuf {
        let mut builder = ScriptBuf::builder()
            .push_slice(keys.depositor().serialize())
            .push_opcode(OP_CHECKSIGVERIFY)
            .push_slice(keys.vault_provider().serialize())
            .push_opcode(OP_CHECKSIGVERIFY);

        let multisig: Vec<XOnlyPublicKey> = keys
            .vault_keepers()
            .iter()
            .chain(keys.universal_challengers())
            .copied()
            .collect();
        for (idx, key) in multisig.iter().enumerate() {
            builder = builder.push_slice(key.serialize()).push_opcode(if idx == 0 {
                OP_CHECKSIG
            } else {
                OP_CHECKSIGADD
            });
        }

        builder
            .push_int(multisig.len() as i64)
            .push_opcode(OP_NUMEQUAL)
            .into_script()
    }
}

impl ScriptEngine for TestScriptEngine {
    fn create_pegin_transaction(&self, spec: &PeginSpec) -> Result<PeginArtifacts, EngineError> {
        let leaf = self.create_payout_script(&spec.keys, spec.network)?;

        let spend_info = TaprootBuilder::new()
            .add_leaf(0, leaf.script)
            .expect("single leaf at depth 0 always fits")
            .finalize(SECP256K1, leaf.internal_key)
            .map_err(|_| EngineError::ScriptGeneration("taproot finalize failed".to_string()))?;
        let address = Address::p2tr(
            SECP256K1,
            leaf.internal_key,
            spend_info.merkle_root(),
            spec.network,
        );
        let vault_script_pubkey = address.script_pubkey();

        let tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: vec![],
            output: vec![TxOut {
                value: spec.amount,
                script_pubkey: vault_script_pubkey.clone(),
            }],
        };

        Ok(PeginArtifacts {
            txid: tx.compute_txid(),
            tx,
            vault_script_pubkey,
            vault_value: spec.amount,
        })
    }

    fn create_payout_script(
        &self,
        keys: &VaultRoleKeys,
        _network: Network,
    ) -> Result<PayoutLeaf, EngineError> {
        Ok(PayoutLeaf {
            script: Self::payout_script(keys),
            internal_key: *UNSPENDABLE_PUBLIC_KEY,
        })
    }
}
