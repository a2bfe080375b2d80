//! Fiscal code extractor CLI.

use std::io::{self, IsTerminal};

use cfx_cli::capture::CaptureOutcome;
use cfx_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    load_settings, run_capture, run_check, run_cin, run_config, run_extract, run_normalize,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = cli.config.as_deref();
    let result = match &cli.command {
        Command::Extract(args) => run_extract(args, &load_settings(config)).map(exit_status),
        Command::Check(args) => run_check(args).map(exit_status),
        Command::Cin(args) => run_cin(args).map(|()| 0),
        Command::Normalize(args) => run_normalize(args).map(|()| 0),
        Command::Capture(args) => run_capture(args, &load_settings(config))
            .map(|outcome| exit_status(matches!(outcome, CaptureOutcome::Copied(_)))),
        Command::Config(command) => run_config(command, config).map(|()| 0),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn exit_status(success: bool) -> i32 {
    if success { 0 } else { 1 }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level(cli.verbosity.tracing_level_filter());
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
    let with_timestamps = cli.log_file.is_some();
    let with_target = config.level_filter >= LevelFilter::DEBUG;
    config
        .with_format(format)
        .with_ansi(with_ansi)
        .with_timestamps(with_timestamps)
        .with_target(with_target)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
}
