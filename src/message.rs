//! Call-site arguments and message normalization.
//!
//! A log call receives any number of [`Arg`]s. [`normalize`] reduces them to
//! the single JSON value stored in the record's `message` field:
//!
//! - no arguments → `""`
//! - one string → redacted (when enabled), then embedded as a JSON object or
//!   array if it parses as one, else as the literal string
//! - one structured value → redacted (when enabled), embedded as-is
//! - several arguments → `printf`-style formatting when the first one is a
//!   string containing `%`, else the non-absent arguments joined by spaces

use std::error::Error;
use std::fmt::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::printf;
use crate::redact::Redactor;

/// One call-site argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Plain text.
    Text(String),
    /// A structured value (number, bool, object, array, or JSON string).
    Value(Value),
    /// Nothing (`None`, JSON `null`). Skipped when joining arguments.
    Absent,
}

impl Arg {
    /// Capture a serializable value.
    ///
    /// Serialization failures are embedded as a `%!v(ERROR=...)` marker.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::from(value),
            Err(e) => Self::Text(format!("%!v(ERROR={e})")),
        }
    }

    /// Capture an error through its [`Display`](fmt::Display) form.
    pub fn error<E: Error + ?Sized>(err: &E) -> Self {
        Self::Value(Value::String(err.to_string()))
    }

    /// Borrow the text if this argument is string-like.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Short type name used in formatting error markers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) | Self::Value(Value::String(_)) => "string",
            Self::Value(Value::Number(n)) if n.is_f64() => "float64",
            Self::Value(Value::Number(_)) => "int",
            Self::Value(Value::Bool(_)) => "bool",
            Self::Value(Value::Array(_)) => "array",
            Self::Value(Value::Object(_)) => "object",
            Self::Value(Value::Null) | Self::Absent => "<nil>",
        }
    }
}

/// Strings unquoted, other values as compact JSON, absent as `<nil>`.
impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Value(Value::String(s)) => f.write_str(s),
            Self::Value(Value::Null) | Self::Absent => f.write_str("<nil>"),
            Self::Value(other) => write!(f, "{other}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            other => Self::Value(other),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

macro_rules! arg_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Self::Value(Value::from(v))
                }
            }
        )*
    };
}

arg_from_scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Non-finite floats have no JSON form; they are kept as `NaN`, `+Inf` or
/// `-Inf` text.
fn float_arg(v: f64) -> Arg {
    if v.is_nan() {
        Arg::Text("NaN".to_string())
    } else if v.is_infinite() {
        Arg::Text(if v > 0.0 { "+Inf" } else { "-Inf" }.to_string())
    } else {
        Arg::Value(Value::from(v))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        float_arg(v)
    }
}

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        float_arg(f64::from(v))
    }
}

/// The full argument list of one log call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Arg>);

impl Args {
    pub fn new(args: Vec<Arg>) -> Self {
        Self(args)
    }

    pub fn as_slice(&self) -> &[Arg] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Arg>> for Args {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl From<()> for Args {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<Arg> for Args {
    fn from(arg: Arg) -> Self {
        Self(vec![arg])
    }
}

impl From<&str> for Args {
    fn from(s: &str) -> Self {
        Self(vec![Arg::from(s)])
    }
}

impl From<String> for Args {
    fn from(s: String) -> Self {
        Self(vec![Arg::from(s)])
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Self(vec![Arg::from(value)])
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reduce call-site arguments to the record's `message` value.
///
/// `redactor` is `Some` only when redaction is enabled; an empty redactor is
/// treated as disabled.
pub fn normalize(args: &Args, redactor: Option<&Redactor>) -> Value {
    let redactor = redactor.filter(|r| !r.is_empty());
    match args.as_slice() {
        [] => Value::String(String::new()),
        [single] => adapt_single(single, redactor),
        [first, rest @ ..] => match first.as_str() {
            Some(template) if template.contains('%') => {
                Value::String(printf::sprintf(template, rest))
            }
            _ => Value::String(join(args.as_slice())),
        },
    }
}

fn adapt_single(arg: &Arg, redactor: Option<&Redactor>) -> Value {
    if let Some(text) = arg.as_str() {
        return match redactor {
            Some(r) => parse_structured(r.redact_str(text)),
            None => parse_structured(text.to_string()),
        };
    }
    match arg {
        Arg::Value(value) => {
            let mut value = value.clone();
            if let Some(r) = redactor {
                r.redact_value(&mut value);
            }
            value
        }
        _ => Value::String(String::new()),
    }
}

/// Embed `text` as a JSON object or array when it parses as one.
fn parse_structured(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        _ => Value::String(text),
    }
}

fn join(args: &[Arg]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().filter(|a| !a.is_absent()).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{arg}");
    }
    out
}
