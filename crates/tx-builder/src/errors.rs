//! Errors raised while assembling vault transactions.
//!
//! All failures are synchronous and carry diagnostic detail; nothing is
//! retried internally. A builder either returns a complete result or fails
//! before producing any output.

use std::fmt::Debug;

use bitcoin::{OutPoint, Txid};
use tbv_primitives::errors::EngineError;
use thiserror::Error;

/// A generic "expected vs got" error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("(expected {expected:?}, got {got:?})")]
pub struct Mismatch<T>
where
    T: Debug + Clone,
{
    /// The value that was expected.
    pub expected: T,
    /// The value that was actually encountered.
    pub got: T,
}

/// Errors from UTXO selection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The candidate set was empty to begin with.
    #[error("no UTXOs available")]
    NoUtxos,

    /// Every candidate was filtered out as unspendable.
    #[error("no valid UTXOs available")]
    NoSpendableUtxos,

    /// The whole candidate set cannot cover the target plus fees.
    #[error("insufficient funds: needed {needed} sats, have {available} sats")]
    InsufficientFunds {
        /// Target amount plus the fee for spending every candidate.
        needed: u64,
        /// Combined value of every spendable candidate.
        available: u64,
    },

    /// The target amount must be positive.
    #[error("target amount must be positive")]
    ZeroTarget,

    /// The fee rate must be positive.
    #[error("fee rate must be positive")]
    ZeroFeeRate,
}

/// Errors from decoding the engine's unfunded transaction template.
// No Eq: hex::FromHexError is PartialEq only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemplateError {
    /// The template was not valid hex.
    #[error("template is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The buffer ended before a required field.
    #[error("template truncated at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The segwit marker/flag pair was not `0x00 0x01`.
    #[error("missing segwit marker/flag: got {got:#06x}")]
    BadMarker { got: u16 },

    /// Templates must declare zero inputs; funding adds them later.
    #[error("template must declare zero inputs, got {0}")]
    UnexpectedInputs(u8),

    /// Templates must carry at least one output.
    #[error("template must have at least one output")]
    NoOutputs,

    /// Bytes remained after the locktime field.
    #[error("{0} trailing bytes after locktime")]
    TrailingBytes(usize),
}

/// Errors from computing single-leaf control blocks.
#[derive(Debug, Error, Clone)]
pub enum ControlBlockError {
    /// The leaf could not be added to the tree.
    #[error("could not build single-leaf taproot tree: {0}")]
    TaprootBuilder(#[from] bitcoin::taproot::TaprootBuilderError),

    /// The tree could not be finalized under the internal key.
    #[error("could not finalize taproot spend info")]
    TaprootFinalize,

    /// The spend info carries no control block for the supplied leaf.
    #[error("no control block for the supplied leaf script")]
    MissingControlBlock,
}

/// Structural precondition failures while building payout PSBTs.
#[derive(Debug, Error)]
pub enum PayoutStructureError {
    /// Payout transactions spend exactly the vault output and one connector.
    #[error("payout transaction must have exactly 2 inputs {0}")]
    WrongInputCount(Mismatch<usize>),

    /// Input 0 must spend the supplied peg-in transaction.
    #[error("input 0 must spend the peg-in transaction {0}")]
    WrongPeginTxid(Mismatch<Txid>),

    /// Input 1 must spend the supplied claim/assert transaction.
    #[error("input 1 must spend the reference transaction {0}")]
    WrongReferenceTxid(Mismatch<Txid>),

    /// Both inputs must spend output 0 of their previous transactions.
    #[error("input {input} must spend output 0 of its previous transaction, got vout {got}")]
    WrongPrevVout { input: usize, got: u32 },

    /// A referenced previous output does not exist.
    #[error("transaction {txid} has no output {vout}")]
    MissingPrevOutput { txid: Txid, vout: u32 },

    /// The unsigned transaction was rejected by the PSBT constructor.
    #[error("could not construct psbt: {0}")]
    Psbt(#[from] bitcoin::psbt::Error),

    /// Control block derivation failed.
    #[error(transparent)]
    ControlBlock(#[from] ControlBlockError),

    /// The script engine failed to produce the payout leaf.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors from locating and normalizing the depositor's signature.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The signed PSBT carries no inputs at all.
    #[error("signed psbt has no inputs")]
    NoInputs,

    /// Input 0 carries no taproot script signatures.
    #[error("no taproot script signatures present on input 0")]
    NoSignatures,

    /// Signatures exist but none belongs to the requested key.
    #[error("no signature matching the depositor key")]
    NoMatchingSignature,

    /// The signature is neither 64 nor 65 bytes long.
    #[error("unexpected signature length: {0} bytes")]
    InvalidLength(usize),

    /// A 65-byte signature carried a sighash flag other than 0x00/0x01.
    #[error("unsupported trailing sighash flag: {0:#04x}")]
    InvalidSighashFlag(u8),

    /// The 64 signature bytes are not a schnorr signature.
    #[error("signature bytes are not a valid schnorr signature")]
    InvalidSignature,
}

/// Errors from building split transactions and their signing PSBTs.
#[derive(Debug, Error)]
pub enum SplitError {
    /// At least one UTXO must be supplied.
    #[error("no UTXOs supplied")]
    NoInputs,

    /// At least one output must be requested.
    #[error("no split outputs requested")]
    NoRecipients,

    /// The supplied UTXO set and the transaction inputs must correspond 1:1.
    #[error("utxo count does not match transaction inputs {0}")]
    InputCountMismatch(Mismatch<usize>),

    /// A supplied UTXO does not occupy the outpoint its input spends.
    #[error("utxo {index} does not match its transaction input {mismatch}")]
    OutpointMismatch {
        index: usize,
        mismatch: Mismatch<OutPoint>,
    },

    /// Split inputs are all assumed taproot.
    #[error("input {index} is not a taproot output")]
    NonTaprootInput { index: usize },

    /// The unsigned transaction was rejected by the PSBT constructor.
    #[error("could not construct psbt: {0}")]
    Psbt(#[from] bitcoin::psbt::Error),
}
