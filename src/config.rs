//! Declarative logger configuration with TOML file support.
//!
//! [`Configs`] holds every option as an `Option`: unset fields leave the
//! logger untouched when applied with
//! [`Logger::set_configs`](crate::Logger::set_configs). The `noodlog` binary
//! merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/noodlog/config.toml` or `$XDG_CONFIG_HOME/noodlog/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::color::Color;
use crate::error::NoodlogError;
use crate::level::Level;
use crate::sink::Output;
use crate::timestamp::TimeFormat;

/// Per-level color overrides. Unset levels keep their current color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomColors {
    pub trace: Option<Color>,
    pub debug: Option<Color>,
    pub info: Option<Color>,
    pub warn: Option<Color>,
    pub error: Option<Color>,
    pub panic: Option<Color>,
    pub fatal: Option<Color>,
}

impl CustomColors {
    /// Set overrides paired with their level.
    pub fn entries(&self) -> impl Iterator<Item = (Level, &Color)> {
        [
            (Level::Trace, &self.trace),
            (Level::Debug, &self.debug),
            (Level::Info, &self.info),
            (Level::Warn, &self.warn),
            (Level::Error, &self.error),
            (Level::Panic, &self.panic),
            (Level::Fatal, &self.fatal),
        ]
        .into_iter()
        .filter_map(|(level, color)| color.as_ref().map(|c| (level, c)))
    }
}

/// All logger options, each optional.
///
/// ```toml
/// level = "debug"
/// output = "stderr"
/// pretty = true
/// trace_caller = true
/// single_point_tracing = false
/// colors = true
/// redact = true
/// sensitive_fields = ["password", "token"]
///
/// [time]
/// zone = "Europe/Rome"
/// format = "%Y-%m-%dT%H:%M:%S"
///
/// [custom_colors]
/// debug = "purple"
/// error = { foreground = "white", background = "red" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configs {
    /// Minimum severity; unknown names mean `info`.
    pub level: Option<String>,
    pub output: Option<Output>,
    /// Indent records.
    pub pretty: Option<bool>,
    pub trace_caller: Option<bool>,
    /// Report the caller of a single shared logging wrapper.
    pub single_point_tracing: Option<bool>,
    pub colors: Option<bool>,
    pub custom_colors: Option<CustomColors>,
    /// Mask the values of `sensitive_fields`.
    pub redact: Option<bool>,
    pub sensitive_fields: Option<Vec<String>>,
    pub time: Option<TimeFormat>,
    /// Terminate the process after a fatal record.
    pub exit_on_fatal: Option<bool>,
}

impl Configs {
    /// Build the binary's settings from CLI args and the config file.
    ///
    /// The config file is read from `--config` or [`default_path`](Self::default_path)
    /// when it exists. Flags given on the command line win over it.
    pub fn from_cli(cli: &Cli) -> Result<Self, NoodlogError> {
        let config_path = cli.config.clone().unwrap_or_else(Self::default_path);
        let file = if config_path.exists() {
            Self::load(&config_path)?
        } else {
            Self::default()
        };
        Ok(file.merge(Self::flags(cli)))
    }

    /// Only the settings given explicitly on the command line.
    fn flags(cli: &Cli) -> Self {
        let time = (cli.time_zone.is_some() || cli.time_format.is_some()).then(|| TimeFormat {
            zone: cli.time_zone.clone(),
            format: cli.time_format.clone(),
        });
        Self {
            level: cli.threshold.map(|l| l.name().to_string()),
            output: cli.output.clone(),
            pretty: cli.pretty.then_some(true),
            trace_caller: cli.trace_caller.then_some(true),
            colors: match cli.color {
                ColorMode::Always => Some(true),
                ColorMode::Never => Some(false),
                ColorMode::Auto => None,
            },
            redact: cli.redact.as_ref().map(|_| true),
            sensitive_fields: cli.redact.clone(),
            time,
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, NoodlogError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self, NoodlogError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NoodlogError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/noodlog/config.toml` or
    /// `~/.config/noodlog/config.toml`.
    pub fn default_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("noodlog").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("noodlog")
                .join("config.toml")
        } else {
            PathBuf::from(".config/noodlog/config.toml")
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            level: other.level.or(self.level),
            output: other.output.or(self.output),
            pretty: other.pretty.or(self.pretty),
            trace_caller: other.trace_caller.or(self.trace_caller),
            single_point_tracing: other.single_point_tracing.or(self.single_point_tracing),
            colors: other.colors.or(self.colors),
            custom_colors: other.custom_colors.or(self.custom_colors),
            redact: other.redact.or(self.redact),
            sensitive_fields: other.sensitive_fields.or(self.sensitive_fields),
            time: merge_time(self.time, other.time),
            exit_on_fatal: other.exit_on_fatal.or(self.exit_on_fatal),
        }
    }
}

/// Zone and pattern are overlaid separately.
fn merge_time(base: Option<TimeFormat>, over: Option<TimeFormat>) -> Option<TimeFormat> {
    match (base, over) {
        (Some(base), Some(over)) => Some(TimeFormat {
            zone: over.zone.or(base.zone),
            format: over.format.or(base.format),
        }),
        (base, over) => over.or(base),
    }
}
