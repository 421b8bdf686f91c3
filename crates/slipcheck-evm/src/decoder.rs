//! `SwapDecoder`: the top-level router-calldata decoder.
//!
//! Decode order:
//! 1. Fewer than 4 bytes       → `DecodeError::TruncatedData`
//! 2. Selector not in the table → `DecodeError::UnrecognizedSelector`
//! 3. Otherwise                 → the entry's layout decoder on the argument bytes

use slipcheck_core::{CalldataDecoder, DecodeError, DecodedSwap};

use crate::abi::SELECTOR_LEN;
use crate::selectors::{SelectorEntry, KNOWN_SELECTORS};

/// Decoder for Uniswap-style router swap calls.
///
/// # Usage
/// ```rust,no_run
/// use slipcheck_evm::SwapDecoder;
/// use slipcheck_core::CalldataDecoder;
///
/// let decoder = SwapDecoder::new();
/// let swap = decoder.decode_hex("0x38ed1739...").unwrap();
/// println!("{swap}");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SwapDecoder {
    selectors: &'static [SelectorEntry],
}

impl SwapDecoder {
    /// Decoder over the built-in selector table.
    pub fn new() -> Self {
        Self::with_selectors(KNOWN_SELECTORS)
    }

    /// Decoder over a restricted table (for testing or narrowing support).
    pub fn with_selectors(selectors: &'static [SelectorEntry]) -> Self {
        Self { selectors }
    }

    pub fn lookup(&self, selector: [u8; 4]) -> Option<&'static SelectorEntry> {
        self.selectors.iter().find(|e| e.selector == selector)
    }

    /// Every selector this decoder understands.
    pub fn known_selectors(&self) -> &'static [SelectorEntry] {
        self.selectors
    }
}

impl Default for SwapDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalldataDecoder for SwapDecoder {
    fn decode(&self, calldata: &[u8]) -> Result<DecodedSwap, DecodeError> {
        if calldata.len() < SELECTOR_LEN {
            return Err(DecodeError::TruncatedData {
                offset: 0,
                needed: SELECTOR_LEN,
                available: calldata.len(),
            });
        }
        let (head, args) = calldata.split_at(SELECTOR_LEN);
        let selector = [head[0], head[1], head[2], head[3]];

        let Some(entry) = self.lookup(selector) else {
            tracing::debug!(selector = %hex::encode(selector), "unrecognized selector");
            return Err(DecodeError::UnrecognizedSelector { selector });
        };

        let result = (entry.decode)(entry.function, args);
        match &result {
            Ok(swap) => tracing::debug!(
                function = entry.function.name(),
                tokens = swap.tokens().len(),
                "decoded swap"
            ),
            Err(e) => tracing::debug!(function = entry.function.name(), error = %e, "decode failed"),
        }
        result
    }
}
