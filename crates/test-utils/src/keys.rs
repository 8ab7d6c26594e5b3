use bitcoin::{
    secp256k1::{Keypair, SecretKey},
    XOnlyPublicKey,
};
use secp256k1::SECP256K1;
use tbv_primitives::keys::VaultRoleKeys;

/// Deterministic x-only key derived from a fixed 32-byte secret.
pub fn xonly_from_secret(secret: [u8; 32]) -> XOnlyPublicKey {
    let secret_key = SecretKey::from_slice(&secret).expect("test secret must be valid");
    let keypair = Keypair::from_secret_key(SECP256K1, &secret_key);
    XOnlyPublicKey::from_keypair(&keypair).0
}

/// A fixed role key set: one depositor, one provider, two keepers, one
/// challenger.
pub fn test_role_keys() -> VaultRoleKeys {
    VaultRoleKeys::new(
        xonly_from_secret([0x01; 32]),
        xonly_from_secret([0x02; 32]),
        vec![xonly_from_secret([0x03; 32]), xonly_from_secret([0x04; 32])],
        vec![xonly_from_secret([0x05; 32])],
    )
    .expect("keepers are non-empty")
}
