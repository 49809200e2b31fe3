//! CLI argument definitions for the request gate.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "igo-gate",
    version,
    about = "Validation gate for inbound sample-request json",
    long_about = "Inspect an inbound sample-request document, drop samples that\n\
                  fail the rule set for their request class, and emit the\n\
                  filtered document for downstream publishing. Rejected and\n\
                  partially filtered requests are recorded to the audit log."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter a request down to its valid samples and print the result.
    Filter(FilterArgs),

    /// Run only the request-level metadata pre-check.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct FilterArgs {
    /// Path to the request JSON document, or '-' for stdin.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the filtered document to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for the audit log. When omitted, flagged requests are
    /// only reported via stderr logging.
    #[arg(long = "audit-dir", value_name = "DIR")]
    pub audit_dir: Option<PathBuf>,

    /// Silently skip non-CMO requests (routing filter, not audited).
    #[arg(long = "cmo-only")]
    pub cmo_only: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the request JSON document, or '-' for stdin.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Treat non-CMO requests as skipped.
    #[arg(long = "cmo-only")]
    pub cmo_only: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
