use bitcoin::{hashes::Hash, Amount, ScriptBuf, Txid, XOnlyPublicKey};
use secp256k1::SECP256K1;
use tbv_primitives::utxo::Utxo;

/// A UTXO locked to a key-path-only P2TR output for `owner`. The txid is
/// derived from `seed` so fixtures are reproducible.
pub fn p2tr_utxo(seed: u8, value: u64, owner: XOnlyPublicKey) -> Utxo {
    let script_pubkey = ScriptBuf::new_p2tr(SECP256K1, owner, None);
    utxo_with_script(seed, value, script_pubkey)
}

/// A UTXO with an arbitrary locking script.
pub fn utxo_with_script(seed: u8, value: u64, script_pubkey: ScriptBuf) -> Utxo {
    Utxo::new(
        Txid::from_byte_array([seed; 32]),
        0,
        Amount::from_sat(value),
        script_pubkey,
    )
}
