//! escale terminal client.

use clap::{ColorChoice, Parser};
use escale_cli::logging::{LogConfig, LogFormat, init_logging};
use escale_client::ApiError;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_add, run_delete, run_download, run_edit, run_schema, run_view};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Schema(args) => run_schema(&cli, args),
        Command::View(args) => run_view(&cli, args),
        Command::Add(args) => run_add(&cli, args),
        Command::Edit(args) => run_edit(&cli, args),
        Command::Delete(args) => run_delete(&cli, args),
        Command::Download(args) => run_download(&cli, args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

/// Print a failure for the user. An access-denied response gets its own
/// wording so an expired session reads differently from a backend rejection.
fn report_error(error: &anyhow::Error) {
    let access_denied = error
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::AccessDenied)));
    if access_denied {
        eprintln!("access denied: the backend rejected this session; pass a fresh --token");
    } else {
        eprintln!("error: {error:#}");
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
