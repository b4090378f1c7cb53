//! Command-line interface definitions.
//!
//! Defines the CLI structure for crossarb using `clap`: `run` for detection
//! cycles and `check` for diagnostics.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Cross-platform prediction market matching and arbitrage detection
#[derive(Parser, Debug)]
#[command(name = "crossarb")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the crossarb CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run detection cycles against the live platforms
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `crossarb check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file [default: ./config.toml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` subcommand. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to the configuration file [default: ./config.toml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run a single cycle and exit.
    #[arg(long, conflicts_with = "continuous")]
    pub once: bool,

    /// Keep cycling until interrupted.
    #[arg(long)]
    pub continuous: bool,

    /// Seconds between continuous cycles.
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Category to evaluate (repeatable). Replaces the configured list.
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Override the match confidence threshold (0 to 1).
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Override the minimum profit percentage.
    #[arg(long)]
    pub min_profit: Option<Decimal>,

    /// Override the minimum liquidity on both legs.
    #[arg(long)]
    pub min_liquidity: Option<Decimal>,

    /// Enable the semantic similarity signal.
    #[arg(long)]
    pub semantic: bool,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}
