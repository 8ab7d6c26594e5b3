//! Depositor signature extraction from signed PSBTs.

use bitcoin::{psbt::Psbt, secp256k1::schnorr, XOnlyPublicKey};
use tracing::debug;

use crate::errors::SignatureError;

/// Length of a bare schnorr signature.
pub const SCHNORR_SIG_LEN: usize = 64;

/// Length of a schnorr signature with a trailing sighash flag byte.
pub const SCHNORR_SIG_WITH_FLAG_LEN: usize = 65;

/// Strips an optional trailing sighash flag and parses the remaining 64
/// bytes as a schnorr signature. Only `0x00` (default) and `0x01` (ALL)
/// flags are accepted; anything else indicates a signer we cannot
/// aggregate with.
pub fn normalize_schnorr_signature(bytes: &[u8]) -> Result<schnorr::Signature, SignatureError> {
    let sig_bytes = match bytes.len() {
        SCHNORR_SIG_LEN => bytes,
        SCHNORR_SIG_WITH_FLAG_LEN => {
            let flag = bytes[SCHNORR_SIG_LEN];
            if flag != 0x00 && flag != 0x01 {
                return Err(SignatureError::InvalidSighashFlag(flag));
            }
            &bytes[..SCHNORR_SIG_LEN]
        }
        other => return Err(SignatureError::InvalidLength(other)),
    };
    schnorr::Signature::from_slice(sig_bytes).map_err(|_| SignatureError::InvalidSignature)
}

/// Extracts the depositor's schnorr signature over input 0 of a signed
/// peg-in PSBT.
///
/// Signatures are looked up in the taproot script-signature map keyed by
/// `depositor`. If the input was already finalized the witness stack's
/// first element is taken instead; the depositor signs before any other
/// party, so in a finalized single-signer input that element is theirs.
pub fn extract_depositor_signature(
    psbt: &Psbt,
    depositor: &XOnlyPublicKey,
) -> Result<schnorr::Signature, SignatureError> {
    let input = psbt.inputs.first().ok_or(SignatureError::NoInputs)?;

    for ((pubkey, leaf_hash), sig) in &input.tap_script_sigs {
        if pubkey == depositor {
            debug!(%pubkey, %leaf_hash, "found depositor script signature");
            return normalize_schnorr_signature(&sig.to_vec());
        }
    }

    if let Some(witness) = &input.final_script_witness {
        let element = witness.nth(0).ok_or(SignatureError::NoSignatures)?;
        return normalize_schnorr_signature(element);
    }

    if input.tap_script_sigs.is_empty() {
        Err(SignatureError::NoSignatures)
    } else {
        Err(SignatureError::NoMatchingSignature)
    }
}
