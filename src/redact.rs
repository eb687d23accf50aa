//! Sensitive field redaction.
//!
//! Two passes are available:
//!
//! - [`Redactor::redact_str`] masks values in JSON-shaped *text*. It matches
//!   both raw JSON (`"password": "x"`) and JSON that was itself serialized
//!   into a string (`\"password\": \"x\"`). Per field, the escaped form is
//!   masked first, then the raw form. Matching is textual and lazy: the value
//!   ends at the first closing quote.
//! - [`Redactor::redact_value`] masks values in a parsed [`serde_json::Value`]
//!   tree, at any depth and for any value type, and runs the textual pass
//!   over string leaves so serialized JSON embedded in strings is covered too.

use regex::{NoExpand, Regex};
use serde_json::Value;

/// Replacement for every redacted value.
pub const MASK: &str = "**********";

#[derive(Debug, Clone)]
struct FieldRule {
    field: String,
    escaped: Regex,
    escaped_replacement: String,
    raw: Regex,
    raw_replacement: String,
}

impl FieldRule {
    fn new(field: &str) -> Option<Self> {
        let name = regex::escape(field);
        let escaped = Regex::new(&format!(r#"\\"{name}\\":.*?"(.*?)\\""#)).ok()?;
        let raw = Regex::new(&format!(r#""{name}":.*?"(.*?)""#)).ok()?;
        Some(Self {
            field: field.to_string(),
            escaped,
            escaped_replacement: format!(r#"\"{field}\": \"{MASK}\""#),
            raw,
            raw_replacement: format!(r#""{field}": "{MASK}""#),
        })
    }

    fn apply(&self, text: &str) -> String {
        let text = self
            .escaped
            .replace_all(text, NoExpand(&self.escaped_replacement));
        self.raw
            .replace_all(&text, NoExpand(&self.raw_replacement))
            .into_owned()
    }
}

/// A compiled set of sensitive field names.
///
/// Patterns are compiled once, when the set is built.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    rules: Vec<FieldRule>,
}

impl Redactor {
    /// Compile a redactor for the given field names. Empty names are ignored.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = fields
            .into_iter()
            .filter(|f| !f.as_ref().is_empty())
            .filter_map(|f| FieldRule::new(f.as_ref()))
            .collect();
        Self { rules }
    }

    /// `true` when no field is configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Configured field names, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.field.as_str())
    }

    /// Mask every configured field in JSON-shaped text.
    pub fn redact_str(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            out = rule.apply(&out);
        }
        out
    }

    /// Mask every configured field in a JSON tree, in place.
    pub fn redact_value(&self, value: &mut Value) {
        if self.is_empty() {
            return;
        }
        match value {
            Value::Object(map) => {
                for (key, nested) in map.iter_mut() {
                    if self.fields().any(|f| f == key) {
                        *nested = Value::String(MASK.to_string());
                    } else {
                        self.redact_value(nested);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.redact_value(item);
                }
            }
            Value::String(s) => {
                if self.fields().any(|f| s.contains(f)) {
                    *s = self.redact_str(s);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}
