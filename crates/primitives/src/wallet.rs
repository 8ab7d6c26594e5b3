//! Signing contract satisfied by wallet adapters.
//!
//! Adapters and their mocks live outside this workspace; builders only ever
//! see this trait.

use bitcoin::{Psbt, XOnlyPublicKey};

use crate::errors::WalletError;

/// A wallet that can reveal its x-only public key and sign PSBTs.
pub trait WalletSigner {
    /// The wallet's x-only public key.
    fn public_key(&self) -> XOnlyPublicKey;

    /// Signs every input the wallet controls and returns the updated PSBT.
    fn sign_psbt(&self, psbt: Psbt) -> Result<Psbt, WalletError>;

    /// Signs a batch of PSBTs in one round trip. Adapters without native
    /// batch support keep the default refusal.
    fn sign_psbts(&self, _psbts: Vec<Psbt>) -> Result<Vec<Psbt>, WalletError> {
        Err(WalletError::BatchSigningUnsupported)
    }
}
