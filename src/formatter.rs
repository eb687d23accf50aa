//! Record composition and rendering.
//!
//! A [`Record`] is built fresh for every log call, serialized to JSON in
//! compact or indented form and, when colors are enabled, wrapped between
//! the level's escape code and the reset code.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::caller::Caller;
use crate::color::Color;
use crate::level::Level;

/// Indentation used by pretty-printed records.
const PRETTY_INDENT: &[u8] = b"   ";

/// One log record, in wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub level: Level,
    pub message: Value,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl Record {
    pub fn new(level: Level, message: Value, time: String) -> Self {
        Self {
            level,
            message,
            time,
            file: None,
            function: None,
        }
    }

    /// Attach caller information; absent fields stay absent.
    #[must_use]
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.file = caller.file;
        self.function = caller.function;
        self
    }

    /// Serialize to JSON, indented with three spaces when `pretty`.
    pub fn to_json(&self, pretty: bool) -> String {
        let result = if pretty {
            let mut buf = Vec::with_capacity(128);
            let mut ser =
                Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(PRETTY_INDENT));
            self.serialize(&mut ser)
                .map(|()| String::from_utf8_lossy(&buf).into_owned())
        } else {
            serde_json::to_string(self)
        };
        // A record only holds strings and JSON values, so this never fails;
        // the level and time are still emitted if it somehow does.
        result.unwrap_or_else(|e| {
            format!(
                r#"{{"level":"{}","message":"%!v(ERROR={e})","time":"{}"}}"#,
                self.level, self.time
            )
        })
    }

    /// Serialize and optionally wrap in `color` and the reset code.
    pub fn render(&self, pretty: bool, color: Option<&Color>) -> String {
        let json = self.to_json(pretty);
        match color {
            Some(color) => color.paint(&json),
            None => json,
        }
    }
}
