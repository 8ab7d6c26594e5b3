//! Shared fixtures for vault transaction tests: deterministic keys, UTXO
//! factories, and an in-process script engine.

mod engine;
mod keys;
mod tx;

pub use engine::TestScriptEngine;
pub use keys::{test_role_keys, xonly_from_secret};
pub use tx::{p2tr_utxo, utxo_with_script};
