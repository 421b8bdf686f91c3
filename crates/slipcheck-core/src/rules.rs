//! Heuristic rules evaluated against a decoded swap.
//!
//! Every rule is an independent function returning zero or one finding.
//! [`check`] runs all of them in [`RULES`] order; none short-circuits.

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};

use crate::config::CheckConfig;
use crate::types::{DecodedSwap, Finding, FindingCode, TradeDirection};

/// Inputs shared by every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    /// Current UNIX time in seconds.
    pub now: u64,
    pub config: CheckConfig,
}

impl RuleContext {
    pub fn new(now: u64, config: CheckConfig) -> Self {
        Self { now, config }
    }

    /// Latest deadline that is not considered excessive.
    pub fn deadline_limit(&self) -> U256 {
        U256::from(self.now).saturating_add(U256::from(self.config.deadline_horizon_secs))
    }
}

/// Signature shared by all rules.
pub type Rule = fn(&DecodedSwap, &RuleContext) -> Option<Finding>;

/// Evaluation order. Findings come back in this order.
pub const RULES: &[Rule] = &[
    unbounded_slippage,
    no_deadline,
    excessive_deadline,
    noop_path,
    duplicate_hop,
    long_path,
];

/// Run every rule against `swap`.
pub fn check(swap: &DecodedSwap, ctx: &RuleContext) -> Vec<Finding> {
    let findings: Vec<Finding> = RULES.iter().filter_map(|rule| rule(swap, ctx)).collect();
    for f in &findings {
        tracing::trace!(code = %f.code, severity = %f.severity, "rule hit");
    }
    findings
}

// ─── Slippage ─────────────────────────────────────────────────────────────────

/// A zero bound accepts any price. A bound carried in `msg.value` is not
/// visible in calldata and is skipped.
pub fn unbounded_slippage(swap: &DecodedSwap, _ctx: &RuleContext) -> Option<Finding> {
    if swap.slippage_bound()? != U256::ZERO {
        return None;
    }
    let direction = swap.direction();
    let accepts = match direction {
        TradeDirection::ExactInput => "accepts any output amount",
        TradeDirection::ExactOutput => "accepts any input amount",
    };
    Some(Finding::warning(
        FindingCode::UnboundedSlippage,
        format!("{} is 0: {accepts}", direction.bound_name()),
    ))
}

// ─── Deadline ─────────────────────────────────────────────────────────────────

pub fn no_deadline(swap: &DecodedSwap, _ctx: &RuleContext) -> Option<Finding> {
    (swap.deadline() == U256::ZERO).then(|| {
        Finding::warning(FindingCode::NoDeadline, "deadline is 0: transaction never expires")
    })
}

pub fn excessive_deadline(swap: &DecodedSwap, ctx: &RuleContext) -> Option<Finding> {
    let deadline = swap.deadline();
    if deadline == U256::ZERO || deadline <= ctx.deadline_limit() {
        return None;
    }
    let horizon = ctx.config.deadline_horizon_secs;
    let when = (deadline <= U256::from(i64::MAX as u64))
        .then(|| DateTime::<Utc>::from_timestamp(deadline.to::<u64>() as i64, 0))
        .flatten();
    let message = match when {
        Some(ts) => {
            let ahead = deadline - U256::from(ctx.now);
            format!(
                "deadline {deadline} ({}) is {ahead}s ahead, beyond the {horizon}s horizon",
                ts.format("%Y-%m-%dT%H:%M:%SZ")
            )
        }
        None => format!("deadline {deadline} is effectively never, beyond the {horizon}s horizon"),
    };
    Some(Finding::warning(FindingCode::ExcessiveDeadline, message))
}

// ─── Path shape ───────────────────────────────────────────────────────────────

pub fn noop_path(swap: &DecodedSwap, _ctx: &RuleContext) -> Option<Finding> {
    match swap.tokens() {
        [a, b] if a == b => Some(Finding::warning(
            FindingCode::NoopPath,
            format!("path swaps {a} for itself"),
        )),
        _ => None,
    }
}

pub fn duplicate_hop(swap: &DecodedSwap, _ctx: &RuleContext) -> Option<Finding> {
    let (token, first, second) = first_non_adjacent_duplicate(swap.tokens())?;
    Some(Finding::warning(
        FindingCode::DuplicateHop,
        format!("{token} appears at hops {first} and {second}"),
    ))
}

pub fn long_path(swap: &DecodedSwap, ctx: &RuleContext) -> Option<Finding> {
    let tokens = swap.tokens().len();
    let max = ctx.config.max_hops;
    (tokens > max).then(|| {
        Finding::info(
            FindingCode::LongPath,
            format!("path has {tokens} tokens, more than the {max} allowed"),
        )
    })
}

/// Earliest `(token, i, j)` with `j - i >= 2` and `path[i] == path[j]`.
fn first_non_adjacent_duplicate(path: &[Address]) -> Option<(Address, usize, usize)> {
    for (i, a) in path.iter().enumerate() {
        for (j, b) in path.iter().enumerate().skip(i + 2) {
            if a == b {
                return Some((*a, i, j));
            }
        }
    }
    None
}
