//! Decoder for the script engine's unfunded transaction templates.
//!
//! The engine serializes zero-input transactions in BIP-144 form, which a
//! general consensus decoder will happily parse but which we want to
//! validate structurally before funding. Layout:
//!
//! | field          | size          |
//! |----------------|---------------|
//! | version        | 4 bytes LE    |
//! | marker, flag   | `0x00 0x01`   |
//! | input count    | 1 byte, `0`   |
//! | output count   | 1 byte, >= 1  |
//! | per output     | 8-byte LE value, 1-byte script length, script |
//! | locktime       | 4 bytes LE    |
//!
//! Single-byte counts and script lengths are the compact-size short form;
//! vault templates never come near the 253 boundary where the long forms
//! kick in.

use bitcoin::{absolute::LockTime, transaction::Version, Amount, ScriptBuf, TxOut};

use crate::errors::TemplateError;

/// A parsed zero-input transaction awaiting funding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfundedTemplate {
    /// Transaction version.
    pub version: Version,
    /// Absolute locktime.
    pub lock_time: LockTime,
    /// Outputs in template order. The vault output is index 0.
    pub outputs: Vec<TxOut>,
}

struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], TemplateError> {
        let remaining = self.buf.len() - self.offset;
        if remaining < n {
            return Err(TemplateError::Truncated {
                offset: self.offset,
                needed: n,
                remaining,
            });
        }
        let slice = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8, TemplateError> {
        Ok(self.take(1)?[0])
    }

    fn take_u32_le(&mut self) -> Result<u32, TemplateError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take_u64_le(&mut self) -> Result<u64, TemplateError> {
        let bytes = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(arr))
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }
}

/// Parses a raw unfunded template, rejecting anything that is not a
/// zero-input segwit transaction with at least one output and no
/// trailing garbage.
pub fn parse_unfunded_template(raw: &[u8]) -> Result<UnfundedTemplate, TemplateError> {
    let mut cursor = Cursor {
        buf: raw,
        offset: 0,
    };

    let version = Version(cursor.take_u32_le()? as i32);

    let marker = cursor.take_u8()?;
    let flag = cursor.take_u8()?;
    if marker != 0x00 || flag != 0x01 {
        return Err(TemplateError::BadMarker {
            got: u16::from_be_bytes([marker, flag]),
        });
    }

    let input_count = cursor.take_u8()?;
    if input_count != 0 {
        return Err(TemplateError::UnexpectedInputs(input_count));
    }

    let output_count = cursor.take_u8()?;
    if output_count == 0 {
        return Err(TemplateError::NoOutputs);
    }

    let mut outputs = Vec::with_capacity(output_count as usize);
    for _ in 0..output_count {
        let value = Amount::from_sat(cursor.take_u64_le()?);
        let script_len = cursor.take_u8()? as usize;
        let script = ScriptBuf::from_bytes(cursor.take(script_len)?.to_vec());
        outputs.push(TxOut {
            value,
            script_pubkey: script,
        });
    }

    let lock_time = LockTime::from_consensus(cursor.take_u32_le()?);

    if cursor.remaining() != 0 {
        return Err(TemplateError::TrailingBytes(cursor.remaining()));
    }

    Ok(UnfundedTemplate {
        version,
        lock_time,
        outputs,
    })
}

/// Hex-decodes and parses an unfunded template.
pub fn parse_unfunded_template_hex(raw: &str) -> Result<UnfundedTemplate, TemplateError> {
    let bytes = hex::decode(raw)?;
    parse_unfunded_template(&bytes)
}
