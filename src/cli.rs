//! Command-line argument definitions for `noodlog`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::level::Level;
use crate::sink::Output;

/// Write structured JSON log records.
///
/// Logs the MESSAGE arguments as one record, or every stdin line as its own
/// record when no MESSAGE is given.
#[derive(Debug, Parser)]
#[command(name = "noodlog", version, about, long_about = None)]
pub struct Cli {
    /// Message arguments. A first argument containing `%` is a format
    /// template for the rest; otherwise they are joined with spaces.
    pub message: Vec<String>,

    /// Level of the records to write.
    #[arg(short = 'l', long, value_parser = parse_level_arg, default_value = "info")]
    pub level: Level,

    /// Minimum severity level to write.
    ///
    /// Records below this level are dropped.
    #[arg(short = 't', long, value_parser = parse_level_arg)]
    pub threshold: Option<Level>,

    /// Indent records.
    #[arg(short = 'p', long)]
    pub pretty: bool,

    /// Control color output.
    ///
    /// `auto` keeps the config file's setting, or enables colors only when
    /// stdout is a TTY and `NO_COLOR` is unset.
    #[arg(short = 'c', long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Attach the caller's file and function to each record.
    #[arg(long)]
    pub trace_caller: bool,

    /// Mask the values of these fields (comma-separated).
    #[arg(short = 'r', long, value_delimiter = ',')]
    pub redact: Option<Vec<String>>,

    /// Write records here: `stdout`, `stderr`, or a file path (appended).
    #[arg(short = 'o', long, value_parser = parse_output_arg)]
    pub output: Option<Output>,

    /// IANA time zone for the `time` field.
    #[arg(long)]
    pub time_zone: Option<String>,

    /// strftime pattern for the `time` field.
    #[arg(long)]
    pub time_format: Option<String>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Defer to the config file, then to whether stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

/// Parse level argument as case-insensitive string.
fn parse_level_arg(s: &str) -> Result<Level, String> {
    Level::from_name(s).ok_or_else(|| {
        format!(
            "invalid level '{s}': expected one of trace, debug, info, warn, error, panic, fatal"
        )
    })
}

fn parse_output_arg(s: &str) -> Result<Output, String> {
    if s.is_empty() {
        return Err("output must not be empty".to_string());
    }
    Ok(Output::from(s.to_string()))
}
