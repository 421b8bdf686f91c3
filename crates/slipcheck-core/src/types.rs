//! Core types for decoded swaps and the findings raised against them.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Severity ─────────────────────────────────────────────────────────────────

/// How serious a finding is. Only `Warning` affects the CLI exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, not dangerous on its own.
    Info,
    /// The call is missing a protection a careful caller would set.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

// ─── FindingCode ──────────────────────────────────────────────────────────────

/// Enumerated reason for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    /// `amountOutMin` / `amountInMax` is zero.
    UnboundedSlippage,
    /// `deadline` is zero.
    NoDeadline,
    /// `deadline` lies beyond the configured horizon.
    ExcessiveDeadline,
    /// Two-hop path that swaps a token for itself.
    NoopPath,
    /// The same token appears at two non-adjacent hops.
    DuplicateHop,
    /// More tokens in the path than the configured maximum.
    LongPath,
}

impl FindingCode {
    /// Stable machine-readable name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnboundedSlippage => "UNBOUNDED_SLIPPAGE",
            Self::NoDeadline => "NO_DEADLINE",
            Self::ExcessiveDeadline => "EXCESSIVE_DEADLINE",
            Self::NoopPath => "NOOP_PATH",
            Self::DuplicateHop => "DUPLICATE_HOP",
            Self::LongPath => "LONG_PATH",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Finding ──────────────────────────────────────────────────────────────────

/// A single heuristic hit against a decoded swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    pub message: String,
}

impl Finding {
    pub fn warning(code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn info(code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

// ─── SwapFunction ─────────────────────────────────────────────────────────────

/// Router functions the decoder understands.
///
/// Serialized under the Solidity function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapFunction {
    SwapExactTokensForTokens,
    SwapTokensForExactTokens,
    SwapExactETHForTokens,
    SwapTokensForExactETH,
    SwapExactTokensForETH,
    SwapETHForExactTokens,
    SwapExactTokensForTokensSupportingFeeOnTransferTokens,
    SwapExactETHForTokensSupportingFeeOnTransferTokens,
    SwapExactTokensForETHSupportingFeeOnTransferTokens,
    ExactInput,
    ExactOutput,
}

impl SwapFunction {
    /// Solidity function name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SwapExactTokensForTokens => "swapExactTokensForTokens",
            Self::SwapTokensForExactTokens => "swapTokensForExactTokens",
            Self::SwapExactETHForTokens => "swapExactETHForTokens",
            Self::SwapTokensForExactETH => "swapTokensForExactETH",
            Self::SwapExactTokensForETH => "swapExactTokensForETH",
            Self::SwapETHForExactTokens => "swapETHForExactTokens",
            Self::SwapExactTokensForTokensSupportingFeeOnTransferTokens => {
                "swapExactTokensForTokensSupportingFeeOnTransferTokens"
            }
            Self::SwapExactETHForTokensSupportingFeeOnTransferTokens => {
                "swapExactETHForTokensSupportingFeeOnTransferTokens"
            }
            Self::SwapExactTokensForETHSupportingFeeOnTransferTokens => {
                "swapExactTokensForETHSupportingFeeOnTransferTokens"
            }
            Self::ExactInput => "exactInput",
            Self::ExactOutput => "exactOutput",
        }
    }

    /// Canonical signature; `keccak256(signature)[..4]` is the selector.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::SwapExactTokensForTokens => {
                "swapExactTokensForTokens(uint256,uint256,address[],address,uint256)"
            }
            Self::SwapTokensForExactTokens => {
                "swapTokensForExactTokens(uint256,uint256,address[],address,uint256)"
            }
            Self::SwapExactETHForTokens => {
                "swapExactETHForTokens(uint256,address[],address,uint256)"
            }
            Self::SwapTokensForExactETH => {
                "swapTokensForExactETH(uint256,uint256,address[],address,uint256)"
            }
            Self::SwapExactTokensForETH => {
                "swapExactTokensForETH(uint256,uint256,address[],address,uint256)"
            }
            Self::SwapETHForExactTokens => {
                "swapETHForExactTokens(uint256,address[],address,uint256)"
            }
            Self::SwapExactTokensForTokensSupportingFeeOnTransferTokens => {
                "swapExactTokensForTokensSupportingFeeOnTransferTokens(uint256,uint256,address[],address,uint256)"
            }
            Self::SwapExactETHForTokensSupportingFeeOnTransferTokens => {
                "swapExactETHForTokensSupportingFeeOnTransferTokens(uint256,address[],address,uint256)"
            }
            Self::SwapExactTokensForETHSupportingFeeOnTransferTokens => {
                "swapExactTokensForETHSupportingFeeOnTransferTokens(uint256,uint256,address[],address,uint256)"
            }
            Self::ExactInput => "exactInput((bytes,address,uint256,uint256,uint256))",
            Self::ExactOutput => "exactOutput((bytes,address,uint256,uint256,uint256))",
        }
    }

    pub fn direction(&self) -> TradeDirection {
        match self {
            Self::SwapTokensForExactTokens
            | Self::SwapTokensForExactETH
            | Self::SwapETHForExactTokens
            | Self::ExactOutput => TradeDirection::ExactOutput,
            _ => TradeDirection::ExactInput,
        }
    }
}

impl fmt::Display for SwapFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── TradeDirection ───────────────────────────────────────────────────────────

/// Which side of the trade the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    /// Input amount is fixed, the bound is a minimum output.
    ExactInput,
    /// Output amount is fixed, the bound is a maximum input.
    ExactOutput,
}

impl TradeDirection {
    /// Name of the protective bound field for this direction.
    pub fn bound_name(&self) -> &'static str {
        match self {
            Self::ExactInput => "amountOutMin",
            Self::ExactOutput => "amountInMax",
        }
    }
}

// ─── Swap shapes ──────────────────────────────────────────────────────────────

/// A router-v2 style swap with an `address[]` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSwap {
    pub function: SwapFunction,
    pub direction: TradeDirection,
    /// `amountIn` or `amountOut`. `None` when the amount travels as `msg.value`.
    pub amount_specified: Option<U256>,
    /// `amountOutMin` or `amountInMax`. `None` when the bound is `msg.value`.
    pub amount_limit: Option<U256>,
    pub path: Vec<Address>,
    pub recipient: Address,
    pub deadline: U256,
}

/// A Uniswap V3 packed path: `token (fee token)*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPath {
    /// `fees.len() + 1` tokens.
    pub tokens: Vec<Address>,
    /// Pool fee tier per pool crossed, in hundredths of a basis point.
    pub fees: Vec<u32>,
}

impl EncodedPath {
    /// Number of pools the route crosses, one per fee tier.
    pub fn pool_count(&self) -> usize {
        self.fees.len()
    }
}

impl fmt::Display for EncodedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                // A deserialized path may carry fewer fees than pools.
                match self.fees.get(i - 1) {
                    Some(fee) => write!(f, " -({fee})-> ")?,
                    None => write!(f, " -> ")?,
                }
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// A router-v3 `exactInput` / `exactOutput` swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEncodedSwap {
    pub function: SwapFunction,
    pub direction: TradeDirection,
    /// `amountIn` or `amountOut`.
    pub amount_specified: U256,
    /// `amountOutMinimum` or `amountInMaximum`.
    pub amount_limit: U256,
    pub path: EncodedPath,
    pub recipient: Address,
    pub deadline: U256,
}

// ─── DecodedSwap ──────────────────────────────────────────────────────────────

/// The structured result of decoding a known swap call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DecodedSwap {
    Simple(SimpleSwap),
    PathEncoded(PathEncodedSwap),
}

impl DecodedSwap {
    pub fn function(&self) -> SwapFunction {
        match self {
            Self::Simple(s) => s.function,
            Self::PathEncoded(s) => s.function,
        }
    }

    pub fn direction(&self) -> TradeDirection {
        match self {
            Self::Simple(s) => s.direction,
            Self::PathEncoded(s) => s.direction,
        }
    }

    /// Token route in hop order, fee tiers stripped.
    pub fn tokens(&self) -> &[Address] {
        match self {
            Self::Simple(s) => &s.path,
            Self::PathEncoded(s) => &s.path.tokens,
        }
    }

    /// The protective bound, when it is carried in calldata.
    pub fn slippage_bound(&self) -> Option<U256> {
        match self {
            Self::Simple(s) => s.amount_limit,
            Self::PathEncoded(s) => Some(s.amount_limit),
        }
    }

    pub fn deadline(&self) -> U256 {
        match self {
            Self::Simple(s) => s.deadline,
            Self::PathEncoded(s) => s.deadline,
        }
    }

    pub fn recipient(&self) -> Address {
        match self {
            Self::Simple(s) => s.recipient,
            Self::PathEncoded(s) => s.recipient,
        }
    }
}

fn fmt_amount(v: Option<U256>) -> String {
    v.map(|a| a.to_string())
        .unwrap_or_else(|| "msg.value".into())
}

impl fmt::Display for DecodedSwap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (specified, limit) = match self.direction() {
            TradeDirection::ExactInput => ("amountIn", "amountOutMin"),
            TradeDirection::ExactOutput => ("amountOut", "amountInMax"),
        };
        writeln!(f, "  Function:   {}", self.function())?;
        match self {
            Self::Simple(s) => {
                writeln!(f, "  {specified:<11} {}", fmt_amount(s.amount_specified))?;
                writeln!(f, "  {limit:<11} {}", fmt_amount(s.amount_limit))?;
                let path: Vec<_> = s.path.iter().map(|a| a.to_string()).collect();
                writeln!(f, "  Path:       {}", path.join(" -> "))?;
            }
            Self::PathEncoded(s) => {
                writeln!(f, "  {specified:<11} {}", s.amount_specified)?;
                writeln!(f, "  {limit:<11} {}", s.amount_limit)?;
                writeln!(f, "  Path:       {}", s.path)?;
            }
        }
        writeln!(f, "  Recipient:  {}", self.recipient())?;
        write!(f, "  Deadline:   {}", self.deadline())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
