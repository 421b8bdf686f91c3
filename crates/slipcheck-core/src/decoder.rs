//! The `CalldataDecoder` trait and the errors a decode can end in.

use crate::types::DecodedSwap;
use thiserror::Error;

/// Why a calldata blob could not be turned into a [`DecodedSwap`].
///
/// Every variant is recoverable per input: a batch reports it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed hex: {reason}")]
    MalformedHex { reason: String },

    #[error("truncated data: need {needed} bytes at offset {offset}, only {available} available")]
    TruncatedData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("malformed path: {reason}")]
    MalformedPath { reason: String },

    #[error("unrecognized selector 0x{}", hex::encode(.selector))]
    UnrecognizedSelector { selector: [u8; 4] },
}

impl DecodeError {
    /// `true` for every kind except [`DecodeError::UnrecognizedSelector`].
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::UnrecognizedSelector { .. })
    }
}

/// A swap calldata decoder.
///
/// Implementations must be pure: the same bytes always produce the same
/// result.
pub trait CalldataDecoder: Send + Sync {
    /// Decode calldata bytes, selector included.
    fn decode(&self, calldata: &[u8]) -> Result<DecodedSwap, DecodeError>;

    /// Convenience: decode from a hex string (with or without `0x` prefix).
    fn decode_hex(&self, hex_str: &str) -> Result<DecodedSwap, DecodeError> {
        let bytes = parse_calldata_hex(hex_str)?;
        self.decode(&bytes)
    }
}

/// Parse a hex calldata string into bytes.
///
/// Whitespace around the string and a leading `0x`/`0X` are ignored. The
/// result must hold at least a 4-byte selector.
pub fn parse_calldata_hex(hex_str: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = hex_str.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(stripped).map_err(|e| DecodeError::MalformedHex {
        reason: format!("invalid hex: {e}"),
    })?;
    if bytes.len() < 4 {
        return Err(DecodeError::MalformedHex {
            reason: format!("{} bytes is too short for a 4-byte selector", bytes.len()),
        });
    }
    Ok(bytes)
}
