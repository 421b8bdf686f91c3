//! slipcheck-core: foundation types, rules and reports for slipcheck.
//!
//! This crate defines:
//! - [`DecodedSwap`]: the structured form of a known swap call
//! - [`Finding`], [`FindingCode`], [`Severity`]: what the rules report
//! - [`CalldataDecoder`] / [`DecodeError`]: the decoder trait and its failures
//! - [`CheckConfig`] and [`rules::check`]: the heuristic rule set
//! - [`SwapReport`]: per-input outcome, ready for text or JSON output

pub mod config;
pub mod decoder;
pub mod report;
pub mod rules;
pub mod types;

pub use config::{CheckConfig, ConfigError};
pub use decoder::{parse_calldata_hex, CalldataDecoder, DecodeError};
pub use report::{worst_risk, ReportOutcome, RiskAssessment, RiskLevel, SwapReport};
pub use rules::{check, RuleContext};
pub use types::{
    DecodedSwap, EncodedPath, Finding, FindingCode, PathEncodedSwap, Severity, SimpleSwap,
    SwapFunction, TradeDirection,
};
