//! Default command: decode every input, run the rules, print the reports.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use slipcheck_core::{worst_risk, CalldataDecoder, CheckConfig, RuleContext, SwapReport};
use slipcheck_evm::SwapDecoder;

use crate::badge;

pub const EXIT_CLEAN: u8 = 0;
pub const EXIT_WARNINGS: u8 = 1;
pub const EXIT_FAILED_INPUT: u8 = 3;

/// Threshold sources, lowest precedence first: defaults, file, flags.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub deadline_horizon_seconds: Option<u64>,
    pub max_hops: Option<usize>,
}

impl Overrides {
    pub fn resolve(&self) -> Result<CheckConfig> {
        let mut config = match &self.config {
            Some(path) => CheckConfig::from_json_file(path)?,
            None => CheckConfig::default(),
        };
        if let Some(secs) = self.deadline_horizon_seconds {
            config.deadline_horizon_secs = secs;
        }
        if let Some(hops) = self.max_hops {
            config.max_hops = hops;
        }
        config.validate()?;
        tracing::debug!(
            deadline_horizon_secs = config.deadline_horizon_secs,
            max_hops = config.max_hops,
            "thresholds resolved"
        );
        Ok(config)
    }
}

/// Current UNIX time, clamped to zero for clocks set before 1970.
pub fn wall_clock() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Positional calldata arguments, with stdin expanded where requested.
pub fn read_inputs(args: &[String]) -> Result<Vec<String>> {
    collect_inputs(args, || io::stdin().lock())
}

/// Where the reports go.
#[derive(Debug, Default)]
pub struct Outputs {
    /// `-` swaps the text on `out` for JSON; any other path gets a JSON copy
    /// while the text still goes to `out`.
    pub json: Option<PathBuf>,
    /// Badge for the worst risk in the batch.
    pub svg: Option<PathBuf>,
}

impl Outputs {
    fn json_on_stdout(&self) -> bool {
        self.json.as_deref() == Some(Path::new("-"))
    }
}

/// Check every input and write the reports. Returns the exit status.
pub fn run(
    inputs: &[String],
    config: CheckConfig,
    now: u64,
    outputs: &Outputs,
    out: &mut impl Write,
) -> Result<u8> {
    let decoder = SwapDecoder::new();
    let ctx = RuleContext::new(now, config);
    let reports: Vec<SwapReport> = inputs
        .iter()
        .enumerate()
        .map(|(i, hex_str)| {
            let label = format!("#{}", i + 1);
            tracing::debug!(%label, len = hex_str.len(), "checking input");
            SwapReport::build(label, decoder.decode_hex(hex_str), &ctx)
        })
        .collect();

    if outputs.json_on_stdout() {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
    } else {
        let blocks: Vec<String> = reports.iter().map(|r| r.to_string()).collect();
        writeln!(out, "{}", blocks.join("\n\n"))?;
        if let Some(path) = &outputs.json {
            let json = serde_json::to_string_pretty(&reports)?;
            std::fs::write(path, json + "\n")
                .with_context(|| format!("cannot write JSON report to {}", path.display()))?;
            tracing::debug!(path = %path.display(), "JSON report written");
        }
    }

    if let Some(path) = &outputs.svg {
        std::fs::write(path, badge::render(worst_risk(&reports)))
            .with_context(|| format!("cannot write badge to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "badge written");
    }

    Ok(exit_code(&reports))
}

/// Failures outrank warnings.
pub fn exit_code(reports: &[SwapReport]) -> u8 {
    if reports.iter().any(SwapReport::is_failure) {
        EXIT_FAILED_INPUT
    } else if reports.iter().any(SwapReport::has_warnings) {
        EXIT_WARNINGS
    } else {
        EXIT_CLEAN
    }
}

/// Positional arguments in order, with each `-` (or no arguments at all)
/// expanded to the lines of `stdin`.
fn collect_inputs<R, F>(args: &[String], stdin: F) -> Result<Vec<String>>
where
    R: BufRead,
    F: FnOnce() -> R,
{
    if !args.is_empty() && args.iter().all(|a| a != "-") {
        return Ok(args.to_vec());
    }

    let lines = read_lines(stdin())?;
    if args.is_empty() {
        return Ok(lines);
    }
    let mut out = Vec::new();
    let mut lines = Some(lines);
    for arg in args {
        if arg == "-" {
            // stdin is drained by the first `-`
            out.extend(lines.take().unwrap_or_default());
        } else {
            out.push(arg.clone());
        }
    }
    Ok(out)
}

fn read_lines(reader: impl BufRead) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        out.push(trimmed.to_string());
    }
    Ok(out)
}
