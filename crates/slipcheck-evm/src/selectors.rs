//! Static table mapping 4-byte selectors to call shapes.
//!
//! Supporting a new router function means one entry here plus, if the
//! argument layout is new, one decode function.

use std::fmt;

use slipcheck_core::{DecodeError, DecodedSwap, SwapFunction};

use crate::{v2, v3};

/// Decodes the argument bytes (selector stripped) of one call shape.
pub type DecodeFn = fn(SwapFunction, &[u8]) -> Result<DecodedSwap, DecodeError>;

#[derive(Clone, Copy)]
pub struct SelectorEntry {
    /// `keccak256(function.signature())[..4]`.
    pub selector: [u8; 4],
    pub function: SwapFunction,
    pub decode: DecodeFn,
}

impl fmt::Debug for SelectorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorEntry")
            .field("selector", &self.selector_hex())
            .field("function", &self.function)
            .finish_non_exhaustive()
    }
}

impl SelectorEntry {
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }
}

/// Every call shape the decoder knows, in lookup order.
pub static KNOWN_SELECTORS: &[SelectorEntry] = &[
    // ─── Uniswap V2 Router02 ─────────────────────────────────────────────────
    SelectorEntry {
        selector: [0x38, 0xed, 0x17, 0x39],
        function: SwapFunction::SwapExactTokensForTokens,
        decode: v2::decode_token_in,
    },
    SelectorEntry {
        selector: [0x88, 0x03, 0xdb, 0xee],
        function: SwapFunction::SwapTokensForExactTokens,
        decode: v2::decode_token_in,
    },
    SelectorEntry {
        selector: [0x7f, 0xf3, 0x6a, 0xb5],
        function: SwapFunction::SwapExactETHForTokens,
        decode: v2::decode_eth_in,
    },
    SelectorEntry {
        selector: [0x4a, 0x25, 0xd9, 0x4a],
        function: SwapFunction::SwapTokensForExactETH,
        decode: v2::decode_token_in,
    },
    SelectorEntry {
        selector: [0x18, 0xcb, 0xaf, 0xe5],
        function: SwapFunction::SwapExactTokensForETH,
        decode: v2::decode_token_in,
    },
    SelectorEntry {
        selector: [0xfb, 0x3b, 0xdb, 0x41],
        function: SwapFunction::SwapETHForExactTokens,
        decode: v2::decode_eth_in,
    },
    SelectorEntry {
        selector: [0x5c, 0x11, 0xd7, 0x95],
        function: SwapFunction::SwapExactTokensForTokensSupportingFeeOnTransferTokens,
        decode: v2::decode_token_in,
    },
    SelectorEntry {
        selector: [0xb6, 0xf9, 0xde, 0x95],
        function: SwapFunction::SwapExactETHForTokensSupportingFeeOnTransferTokens,
        decode: v2::decode_eth_in,
    },
    SelectorEntry {
        selector: [0x79, 0x1a, 0xc9, 0x47],
        function: SwapFunction::SwapExactTokensForETHSupportingFeeOnTransferTokens,
        decode: v2::decode_token_in,
    },
    // ─── Uniswap V3 SwapRouter ───────────────────────────────────────────────
    SelectorEntry {
        selector: [0xc0, 0x4b, 0x8d, 0x59],
        function: SwapFunction::ExactInput,
        decode: v3::decode_exact,
    },
    SelectorEntry {
        selector: [0xf2, 0x8c, 0x04, 0x98],
        function: SwapFunction::ExactOutput,
        decode: v3::decode_exact,
    },
];

/// Find the table entry for `selector`.
pub fn lookup(selector: [u8; 4]) -> Option<&'static SelectorEntry> {
    KNOWN_SELECTORS.iter().find(|e| e.selector == selector)
}
