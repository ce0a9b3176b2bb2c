//! CLI argument definitions for the seasonality tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use season_model::{DEFAULT_LOOKBACK_YEARS, DEFAULT_MIN_ROWS_FOR_TRIM, DEFAULT_SENTINEL};

#[derive(Parser)]
#[command(
    name = "seasonality",
    version,
    about = "Monthly multiplicative seasonality ratios per country and product",
    long_about = "Compute monthly multiplicative seasonality ratios for demand series.\n\n\
                  Reads a Country/Product/Year/Month/Value table and writes every\n\
                  regularized month with its normalized seasonal index."
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

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute seasonal indices for a CSV file of monthly observations.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV file with Country, Product, Year, Month and Value columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV (default: <INPUT dir>/seasonality_ratios.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the per-month seasonal index table.
    #[arg(long = "index-output", value_name = "PATH")]
    pub index_output: Option<PathBuf>,

    /// Write the data-quality report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Year the retention window is measured from (default: current local year).
    #[arg(long = "current-year", value_name = "YEAR")]
    pub current_year: Option<i32>,

    /// Years of seasonal ratios kept before the current year.
    #[arg(long = "lookback-years", value_name = "YEARS", default_value_t = DEFAULT_LOOKBACK_YEARS)]
    pub lookback_years: i32,

    /// Value text treated as "no data".
    #[arg(long = "sentinel", value_name = "TEXT", default_value = DEFAULT_SENTINEL)]
    pub sentinel: String,

    /// Minimum rows in a month cell before the extreme ratios are trimmed.
    #[arg(long = "min-trim-rows", value_name = "ROWS", default_value_t = DEFAULT_MIN_ROWS_FOR_TRIM)]
    pub min_trim_rows: usize,

    /// Compute and summarize without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
