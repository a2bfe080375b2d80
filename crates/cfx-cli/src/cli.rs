//! CLI argument definitions for the fiscal code extractor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cfx",
    version,
    about = "Italian fiscal code extractor - find, validate and normalize codici fiscali",
    long_about = "Find Italian fiscal codes (codici fiscali) in window titles or free text,\n\
                  check their control character, and undo omocodia substitutions.\n\n\
                  The `capture` command runs the same pipeline as the tray hotkey against\n\
                  a JSON snapshot of the open windows."
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

    /// Allow fiscal codes to appear in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract a fiscal code from each text (or each stdin line).
    Extract(ExtractArgs),

    /// Check the shape and control character of fiscal codes.
    Check(CheckArgs),

    /// Compute the control character from the first 15 characters.
    Cin(CinArgs),

    /// Replace omocodia letters with their digits.
    Normalize(NormalizeArgs),

    /// Run the hotkey pipeline against a snapshot of the open windows.
    Capture(CaptureArgs),

    /// Inspect or edit the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Texts to search (reads stdin lines when omitted).
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Only accept codes whose control character verifies.
    #[arg(long = "strict", conflicts_with = "lenient")]
    pub strict: bool,

    /// Accept codes whose control character does not verify.
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Print codes as found, without undoing omocodia.
    #[arg(long = "raw")]
    pub raw: bool,

    /// Put the last extracted code on the system clipboard.
    #[arg(long = "copy")]
    pub copy: bool,

    /// Print one JSON object per input.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Fiscal codes to check.
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CinArgs {
    /// First 15 characters of a fiscal code (extra characters are ignored).
    #[arg(value_name = "BODY")]
    pub body: String,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Fiscal codes to normalize.
    #[arg(value_name = "CODE", required = true)]
    pub codes: Vec<String>,
}

#[derive(Parser)]
pub struct CaptureArgs {
    /// JSON array of windows (`title`, `class_name`, `process_name`); stdin when omitted.
    #[arg(long = "windows", value_name = "FILE")]
    pub windows: Option<PathBuf>,

    /// Only accept codes whose control character verifies.
    #[arg(long = "strict", conflicts_with = "lenient")]
    pub strict: bool,

    /// Accept codes whose control character does not verify.
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Put the code on the system clipboard instead of printing it.
    #[arg(long = "copy")]
    pub copy: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the current settings.
    Show,

    /// Print the settings file path.
    Path,

    /// Set the capture hotkey, e.g. "CTRL+ALT+F5" or "CTRL+NUMPAD1".
    SetHotkey {
        #[arg(value_name = "HOTKEY")]
        hotkey: String,
    },

    /// Set the default checksum policy.
    SetPolicy {
        #[arg(value_enum)]
        policy: PolicyArg,
    },

    /// Record whether the tray application starts with the session.
    SetAutostart {
        #[arg(action = clap::ArgAction::Set, value_name = "BOOL")]
        enabled: bool,
    },
}

/// CLI checksum policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Lenient,
    Strict,
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
