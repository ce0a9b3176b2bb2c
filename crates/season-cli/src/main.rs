//! Seasonality ratio CLI.

use std::io::{self, IsTerminal};

use chrono::{Datelike, Local};
use clap::{ColorChoice, Parser};
use season_cli::commands::run_seasonality;
use season_cli::logging::{LogConfig, LogFormat, init_logging};
use season_cli::types::RunConfig;
use season_model::PipelineOptions;
use season_output::default_output_path;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, RunArgs};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run_seasonality(&run_config_from_args(args)) {
            Ok(result) => {
                print_summary(&result);
                if result.has_errors { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Resolve defaults that depend on the input path or the local clock.
fn run_config_from_args(args: RunArgs) -> RunConfig {
    let current_year = args.current_year.unwrap_or_else(|| Local::now().year());
    let options = PipelineOptions::new(current_year)
        .with_lookback_years(args.lookback_years)
        .with_sentinel(args.sentinel)
        .with_min_rows_for_trim(args.min_trim_rows);
    RunConfig {
        output: args
            .output
            .unwrap_or_else(|| default_output_path(&args.input)),
        input: args.input,
        index_output: args.index_output,
        report: args.report,
        options,
        dry_run: args.dry_run,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    let mut config = LogConfig::default()
        .with_level(level)
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}
