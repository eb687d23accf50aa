//! Record timestamps.
//!
//! The `time` field is the host clock rendered through a strftime-style
//! pattern with [`jiff`]. The default is local time at seconds precision
//! (`2026-01-15 10:30:00`). A custom IANA time zone and a custom pattern may
//! be configured; an unknown zone falls back to the system zone and an
//! invalid pattern falls back to the default pattern.

use jiff::Timestamp;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;
use serde::Deserialize;

/// Default presentation pattern.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone and pattern used to render record timestamps.
///
/// Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimeFormat {
    /// IANA time zone name, e.g. `Europe/Rome`.
    pub zone: Option<String>,
    /// strftime-compatible pattern.
    pub format: Option<String>,
}

impl TimeFormat {
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Render the current time.
    pub fn now(&self) -> String {
        self.format_at(Timestamp::now())
    }

    /// Render the given instant.
    pub fn format_at(&self, ts: Timestamp) -> String {
        let zoned = ts.to_zoned(self.time_zone());
        let pattern = non_blank(self.format.as_deref()).unwrap_or(DEFAULT_FORMAT);
        strtime::format(pattern, &zoned)
            .or_else(|_| strtime::format(DEFAULT_FORMAT, &zoned))
            .unwrap_or_default()
    }

    fn time_zone(&self) -> TimeZone {
        non_blank(self.zone.as_deref())
            .and_then(|name| TimeZone::get(name).ok())
            .unwrap_or_else(TimeZone::system)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
