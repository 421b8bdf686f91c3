//! slipcheck-evm — offline decoder for Uniswap-style router swap calldata.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use slipcheck_core::{CalldataDecoder, CheckConfig, RuleContext, SwapReport};
//! use slipcheck_evm::SwapDecoder;
//!
//! let decoder = SwapDecoder::new();
//! let ctx = RuleContext::new(1_700_000_000, CheckConfig::default());
//! let report = SwapReport::build("#1", decoder.decode_hex("0x38ed1739..."), &ctx);
//! println!("{report}");
//! ```

pub mod abi;
pub mod decoder;
pub mod selectors;
pub mod v2;
pub mod v3;

pub use decoder::SwapDecoder;
pub use selectors::{lookup, SelectorEntry, KNOWN_SELECTORS};
