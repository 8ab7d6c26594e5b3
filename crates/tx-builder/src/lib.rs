//! Transaction assembly for the BTC vault protocol.
//!
//! This crate selects spendable inputs, funds the script engine's unfunded
//! templates, builds taproot script-path PSBTs for the peg-in and payout
//! flows, extracts depositor signatures from signed PSBTs, and splits UTXOs
//! for multi-vault deposits.
//!
//! Every operation is a synchronous, side-effect-free transformation over
//! explicit inputs: identical inputs always produce byte-identical outputs.
//! Callers rely on this to precompute transaction ids before any signature
//! exists.

pub mod errors;
pub mod fund;
pub mod payout;
pub mod pegin;
pub mod select;
pub mod signature;
pub mod split;
pub mod taproot;
pub mod template;

pub use errors::{
    ControlBlockError, Mismatch, PayoutStructureError, SelectionError, SignatureError, SplitError,
    TemplateError,
};
pub use fund::fund_template;
pub use payout::{build_payout_optimistic_psbt, build_payout_psbt};
pub use pegin::create_pegin_transaction;
pub use select::{select_utxos, UtxoSelection};
pub use signature::{extract_depositor_signature, normalize_schnorr_signature};
pub use split::{build_split_psbt, build_split_transaction, SplitRecipient, SplitTransaction};
pub use taproot::{single_leaf_control_block, single_leaf_spend_info};
pub use template::{parse_unfunded_template, parse_unfunded_template_hex, UnfundedTemplate};
