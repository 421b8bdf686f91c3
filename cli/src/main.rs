//! slipcheck CLI — audit DEX router swap calldata from the terminal.
//!
//! # Usage
//! ```bash
//! # One or more calldata blobs as arguments
//! slipcheck 0x38ed1739... 0xc04b8d59...
//!
//! # One blob per line on stdin (blank lines and `#` comments skipped)
//! cat batch.txt | slipcheck -
//!
//! # Tighter thresholds, JSON output
//! slipcheck --deadline-horizon-seconds 600 --max-hops 3 --json 0x...
//!
//! # Text on stdout, plus a JSON report file and a risk badge
//! slipcheck --json=report.json --svg badge.svg - < swaps.txt
//!
//! # List the selectors the decoder understands
//! slipcheck selectors
//! ```
//!
//! Exit status: `0` clean, `1` warnings, `2` bad flags or config,
//! `3` at least one input could not be decoded.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

mod badge;
mod cmd_check;
mod cmd_selectors;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "slipcheck",
    about = "Audit DEX swap calldata for slippage, deadline and routing risks",
    long_about = "
slipcheck decodes Uniswap-style router swap calldata offline and flags
transactions that accept any price, never expire, expire too far out,
or route through a suspicious token path.

ENVIRONMENT VARIABLES:
  RUST_LOG    tracing filter directives, overrides -v
",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Hex calldata to check; omit or pass `-` to read one per line from stdin
    #[arg(value_name = "CALLDATA")]
    calldata: Vec<String>,

    /// Deadlines further than this many seconds past now are flagged
    #[arg(long, value_name = "SECS")]
    deadline_horizon_seconds: Option<u64>,

    /// Token paths longer than this are flagged
    #[arg(long, value_name = "N")]
    max_hops: Option<usize>,

    /// JSON file holding the thresholds; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Evaluate deadlines against this UNIX time instead of the clock
    #[arg(long, value_name = "UNIX")]
    now: Option<u64>,

    /// Emit a JSON array of reports instead of text; `--json=FILE` writes
    /// it to FILE and keeps the text on stdout
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "-"
    )]
    json: Option<PathBuf>,

    /// Write an SVG badge showing the worst risk in the batch
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log lines as JSON objects
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the known router selectors
    Selectors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    let result = match cli.command {
        Some(Commands::Selectors { json }) => cmd_selectors::run(json).map(|()| ExitCode::SUCCESS),
        None => run_check(cli),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(cmd_check::EXIT_FAILED_INPUT)
        }
    }
}

fn run_check(cli: Cli) -> anyhow::Result<ExitCode> {
    let overrides = cmd_check::Overrides {
        config: cli.config,
        deadline_horizon_seconds: cli.deadline_horizon_seconds,
        max_hops: cli.max_hops,
    };
    let config = match overrides.resolve() {
        Ok(c) => c,
        Err(e) => usage_error(ErrorKind::ValueValidation, format!("{e:#}")),
    };

    let inputs = cmd_check::read_inputs(&cli.calldata)?;
    if inputs.is_empty() {
        usage_error(ErrorKind::MissingRequiredArgument, "no calldata given");
    }

    let outputs = cmd_check::Outputs {
        json: cli.json,
        svg: cli.svg,
    };
    let now = cli.now.unwrap_or_else(cmd_check::wall_clock);
    cmd_check::run(&inputs, config, now, &outputs, &mut io::stdout().lock()).map(ExitCode::from)
}

/// Print `message` with usage and exit with status 2.
fn usage_error(kind: ErrorKind, message: impl std::fmt::Display) -> ! {
    Cli::command().error(kind, message).exit()
}
