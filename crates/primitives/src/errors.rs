//! Errors for parsing and boundary handling of vault primitives.

use thiserror::Error;

/// Errors when parsing and normalizing public keys and role key sets.
#[derive(Debug, Error, Clone)]
pub enum KeyParseError {
    /// A required key field was empty.
    #[error("public key hex is empty")]
    Empty,

    /// The key material was not valid hex.
    #[error("public key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Key byte length was not one of the accepted encodings (32/33/65).
    #[error("unsupported public key length: {0} bytes")]
    InvalidLength(usize),

    /// The provided pubkey is not a valid point on the curve.
    #[error("supplied pubkey is invalid")]
    InvalidPoint(#[from] bitcoin::secp256k1::Error),

    /// A vault needs at least one keeper in its script paths.
    #[error("at least one vault keeper is required")]
    NoVaultKeepers,
}

/// Errors crossing the hex wire boundary.
#[derive(Debug, Error)]
pub enum WireError {
    /// The payload was not valid hex.
    #[error("payload is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded bytes were not a valid consensus-encoded transaction.
    #[error("malformed transaction: {0}")]
    MalformedTx(#[from] bitcoin::consensus::encode::Error),

    /// The decoded bytes were not a valid BIP-174 PSBT.
    #[error("malformed psbt: {0}")]
    MalformedPsbt(#[from] bitcoin::psbt::Error),

    /// The network name is not one we recognize.
    #[error("invalid network: {0}")]
    InvalidNetwork(String),
}

/// Failures reported by the external script-generation engine.
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// The engine rejected one of the supplied public keys.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The engine rejected the network parameter.
    #[error("invalid network: {0}")]
    InvalidNetwork(String),

    /// Script or spend-info generation failed inside the engine.
    #[error("script generation failed: {0}")]
    ScriptGeneration(String),
}

/// Failures reported by a wallet collaborator.
#[derive(Debug, Error, Clone)]
pub enum WalletError {
    /// The wallet does not implement batch signing.
    #[error("wallet does not support signing multiple psbts at once")]
    BatchSigningUnsupported,

    /// The wallet refused or failed to sign.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
