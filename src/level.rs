//! Severity levels with ranking, parsing and default colors.
//!
//! Levels are ordered `trace < debug < info < warn < error < panic < fatal`.
//! A record is written only when its level ranks at or above the logger's
//! threshold.

use std::fmt;

use serde::Serialize;

use crate::color::Color;

/// Canonical severity enumeration.
///
/// Ordered by severity (ascending) for `>=` filtering via [`Ord`]. The
/// discriminant is the level's rank, starting at 1 for
/// [`Trace`](Self::Trace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 1,
    Debug = 2,
    Info = 3,
    Warn = 4,
    Error = 5,
    Panic = 6,
    Fatal = 7,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Panic,
        Self::Fatal,
    ];

    /// Lowercase name, as written in the record's `level` field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Integer rank used for threshold filtering.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Parse a level name, case-insensitive.
    ///
    /// Returns `None` for unrecognized strings.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "panic" => Some(Self::Panic),
            "fatal" => Some(Self::Fatal),
            _ => None,
        }
    }

    /// Parse a level name, falling back to [`Info`](Self::Info) for anything
    /// unrecognized.
    pub fn from_name_or_info(s: &str) -> Self {
        Self::from_name(s).unwrap_or(Self::Info)
    }

    /// Color applied to the whole record when colors are enabled and no
    /// custom color was set for this level.
    pub fn default_color(self) -> Color {
        match self {
            Self::Trace | Self::Info => Color::reset(),
            Self::Debug => Color::named("green"),
            Self::Warn => Color::named("yellow"),
            Self::Error | Self::Panic | Self::Fatal => Color::named("red"),
        }
    }
}

/// Rank of a level given by name; unknown names rank like `info`.
pub fn severity_rank(name: &str) -> u8 {
    Level::from_name_or_info(name).rank()
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
