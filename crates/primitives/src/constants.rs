//! Protocol-wide constants.

use std::{str::FromStr, sync::LazyLock};

use bitcoin::XOnlyPublicKey;

/// Minimum economical output value under standard relay policy, in sats.
/// Outputs at or below this are not worth creating.
pub const BITCOIN_DUST_LIMIT: u64 = 546;

/// Hex form of the NUMS point used as the taproot internal key for
/// script-path-only vault outputs.
pub const UNSPENDABLE_PUBKEY_STR: &str =
    "50929b74c1a04954b78b4b6035e97a5e078a5a0f28ec96d547bfee9ace803ac0";

/// Unspendable internal key used for taproot outputs that must only be
/// spendable through a script path.
pub static UNSPENDABLE_PUBLIC_KEY: LazyLock<XOnlyPublicKey> = LazyLock::new(|| {
    XOnlyPublicKey::from_str(UNSPENDABLE_PUBKEY_STR).expect("static value must be correct")
});
