//! Per-input report: the decode outcome plus its findings and a risk summary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decoder::DecodeError;
use crate::rules::{check, RuleContext};
use crate::types::{DecodedSwap, Finding, FindingCode, Severity};

// ─── Risk ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Weighted summary of a finding list, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
}

impl RiskAssessment {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let total: u32 = findings.iter().map(|f| weight(f.code)).sum();
        let score = total.min(100) as u8;
        let level = match score {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Medium,
            _ => RiskLevel::High,
        };
        Self { score, level }
    }
}

fn weight(code: FindingCode) -> u32 {
    match code {
        FindingCode::UnboundedSlippage => 50,
        FindingCode::NoopPath => 30,
        FindingCode::NoDeadline => 25,
        FindingCode::DuplicateHop => 20,
        FindingCode::ExcessiveDeadline => 15,
        FindingCode::LongPath => 5,
    }
}

// ─── SwapReport ───────────────────────────────────────────────────────────────

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    Decoded {
        swap: DecodedSwap,
        findings: Vec<Finding>,
        risk: RiskAssessment,
    },
    Unrecognized {
        /// `0x`-prefixed selector.
        selector: String,
    },
    Malformed {
        reason: String,
    },
}

/// One report block, produced for every calldata input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapReport {
    /// Caller-chosen label, usually the input's position in the batch.
    pub label: String,
    #[serde(flatten)]
    pub outcome: ReportOutcome,
}

impl SwapReport {
    /// Run the rules over a decode result and wrap everything up.
    pub fn build(
        label: impl Into<String>,
        decoded: Result<DecodedSwap, DecodeError>,
        ctx: &RuleContext,
    ) -> Self {
        let outcome = match decoded {
            Ok(swap) => {
                let findings = check(&swap, ctx);
                let risk = RiskAssessment::from_findings(&findings);
                ReportOutcome::Decoded { swap, findings, risk }
            }
            Err(DecodeError::UnrecognizedSelector { selector }) => ReportOutcome::Unrecognized {
                selector: format!("0x{}", hex::encode(selector)),
            },
            Err(e) => ReportOutcome::Malformed { reason: e.to_string() },
        };
        Self {
            label: label.into(),
            outcome,
        }
    }

    pub fn findings(&self) -> &[Finding] {
        match &self.outcome {
            ReportOutcome::Decoded { findings, .. } => findings,
            _ => &[],
        }
    }

    /// Risk of a decoded swap; `None` for failures.
    pub fn risk(&self) -> Option<RiskAssessment> {
        match &self.outcome {
            ReportOutcome::Decoded { risk, .. } => Some(*risk),
            _ => None,
        }
    }

    /// `true` if any finding is warning-level.
    pub fn has_warnings(&self) -> bool {
        self.findings().iter().any(|f| f.severity == Severity::Warning)
    }

    /// `true` if the input could not be decoded at all.
    pub fn is_failure(&self) -> bool {
        !matches!(self.outcome, ReportOutcome::Decoded { .. })
    }
}

/// Highest-scoring assessment in a batch, or `None` when nothing decoded.
pub fn worst_risk(reports: &[SwapReport]) -> Option<RiskAssessment> {
    reports.iter().filter_map(SwapReport::risk).max_by_key(|r| r.score)
}

impl fmt::Display for SwapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ReportOutcome::Decoded { swap, findings, risk } => {
                writeln!(f, "{}:", self.label)?;
                writeln!(f, "{swap}")?;
                writeln!(f, "  Risk:       {} ({}/100)", risk.level, risk.score)?;
                if findings.is_empty() {
                    write!(f, "  Findings:   none")
                } else {
                    write!(f, "  Findings:")?;
                    for finding in findings {
                        write!(f, "\n    {finding}")?;
                    }
                    Ok(())
                }
            }
            ReportOutcome::Unrecognized { selector } => {
                write!(f, "{}: unrecognized selector {selector}", self.label)
            }
            ReportOutcome::Malformed { reason } => {
                write!(f, "{}: malformed calldata: {reason}", self.label)
            }
        }
    }
}
