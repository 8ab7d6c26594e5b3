//! Shared value types and external contracts for vault transaction assembly.
//!
//! Everything here is a transient value object or a trait seam; there is no
//! persisted or cached state. Hex lives at the wire boundary ([`wire`]) while
//! internal APIs use fixed-length typed values ([`bitcoin::Txid`],
//! [`bitcoin::XOnlyPublicKey`], [`bitcoin::Amount`]).

pub mod constants;
pub mod engine;
pub mod errors;
pub mod keys;
pub mod utxo;
pub mod wallet;
pub mod wire;

pub use engine::{PayoutLeaf, PeginArtifacts, PeginSpec, ScriptEngine};
pub use errors::{EngineError, KeyParseError, WalletError, WireError};
pub use keys::{parse_xonly_pubkey, VaultRoleKeys};
pub use utxo::Utxo;
pub use wallet::WalletSigner;
