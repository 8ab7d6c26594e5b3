//! Public key parsing and the vault role key set.

use bitcoin::XOnlyPublicKey;
use serde::{Deserialize, Serialize};

use crate::errors::KeyParseError;

/// Byte length of an x-only public key.
const XONLY_LEN: usize = 32;
/// Byte length of a compressed public key (prefix 0x02/0x03).
const COMPRESSED_LEN: usize = 33;
/// Byte length of an uncompressed public key (prefix 0x04).
const UNCOMPRESSED_LEN: usize = 65;

/// Parses a hex public key into an [`XOnlyPublicKey`], normalizing the
/// accepted encodings: 32-byte x-only keys pass through, 33-byte compressed
/// and 65-byte uncompressed keys have their prefix byte(s) stripped.
pub fn parse_xonly_pubkey(s: &str) -> Result<XOnlyPublicKey, KeyParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let bytes = hex::decode(s)?;
    let xonly = match bytes.len() {
        XONLY_LEN => &bytes[..],
        COMPRESSED_LEN => &bytes[1..],
        UNCOMPRESSED_LEN => &bytes[1..1 + XONLY_LEN],
        n => return Err(KeyParseError::InvalidLength(n)),
    };

    Ok(XOnlyPublicKey::from_slice(xonly)?)
}

/// The signer roles securing a vault's script paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRoleKeys {
    depositor: XOnlyPublicKey,
    vault_provider: XOnlyPublicKey,
    vault_keepers: Vec<XOnlyPublicKey>,
    universal_challengers: Vec<XOnlyPublicKey>,
}

impl VaultRoleKeys {
    /// Constructs a role key set.
    ///
    /// # Errors
    ///
    /// Returns an error if `vault_keepers` is empty.
    pub fn new(
        depositor: XOnlyPublicKey,
        vault_provider: XOnlyPublicKey,
        vault_keepers: Vec<XOnlyPublicKey>,
        universal_challengers: Vec<XOnlyPublicKey>,
    ) -> Result<Self, KeyParseError> {
        if vault_keepers.is_empty() {
            return Err(KeyParseError::NoVaultKeepers);
        }

        Ok(Self {
            depositor,
            vault_provider,
            vault_keepers,
            universal_challengers,
        })
    }

    /// Parses a role key set from hex-encoded keys at the wire boundary.
    pub fn from_hex(
        depositor: &str,
        vault_provider: &str,
        vault_keepers: &[String],
        universal_challengers: &[String],
    ) -> Result<Self, KeyParseError> {
        let keepers = vault_keepers
            .iter()
            .map(|k| parse_xonly_pubkey(k))
            .collect::<Result<Vec<_>, _>>()?;
        let challengers = universal_challengers
            .iter()
            .map(|k| parse_xonly_pubkey(k))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            parse_xonly_pubkey(depositor)?,
            parse_xonly_pubkey(vault_provider)?,
            keepers,
            challengers,
        )
    }

    pub fn depositor(&self) -> &XOnlyPublicKey {
        &self.depositor
    }

    pub fn vault_provider(&self) -> &XOnlyPublicKey {
        &self.vault_provider
    }

    pub fn vault_keepers(&self) -> &[XOnlyPublicKey] {
        &self.vault_keepers
    }

    pub fn universal_challengers(&self) -> &[XOnlyPublicKey] {
        &self.universal_challengers
    }
}
