//! Hex wire boundary.
//!
//! Upstream and downstream collaborators exchange transactions, PSBTs and
//! network names as hex/strings; everything behind this module is typed.

use bitcoin::{
    consensus::{deserialize, serialize},
    Network, Psbt, Transaction,
};

use crate::errors::WireError;

/// Serializes a transaction to consensus-encoded hex.
pub fn tx_to_hex(tx: &Transaction) -> String {
    hex::encode(serialize(tx))
}

/// Parses a consensus-encoded transaction from hex.
pub fn tx_from_hex(s: &str) -> Result<Transaction, WireError> {
    Ok(deserialize(&hex::decode(s)?)?)
}

/// Serializes a PSBT to BIP-174 hex.
pub fn psbt_to_hex(psbt: &Psbt) -> String {
    hex::encode(psbt.serialize())
}

/// Parses a BIP-174 PSBT from hex.
pub fn psbt_from_hex(s: &str) -> Result<Psbt, WireError> {
    Ok(Psbt::deserialize(&hex::decode(s)?)?)
}

/// Parses a network name as the script engine spells them.
pub fn network_from_str(s: &str) -> Result<Network, WireError> {
    match s.to_lowercase().as_str() {
        "bitcoin" | "mainnet" => Ok(Network::Bitcoin),
        "testnet" => Ok(Network::Testnet),
        "signet" => Ok(Network::Signet),
        "regtest" => Ok(Network::Regtest),
        other => Err(WireError::InvalidNetwork(other.to_string())),
    }
}
