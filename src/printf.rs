//! `printf`-style formatting over call-site arguments.
//!
//! Supports the verbs `%v %s %q %d %f %F %e %t %x %X %o %b` and the `%%`
//! escape, with `-`, `+` and `0` flags, a width and a `.precision`.
//! Formatting never fails; problems are rendered inline:
//!
//! | problem                     | output                   |
//! |-----------------------------|--------------------------|
//! | operand of the wrong type   | `%!d(string=abc)`        |
//! | absent operand              | `%!s(<nil>)`             |
//! | not enough operands         | `%!s(MISSING)`           |
//! | `%` at the end of the input | `%!(NOVERB)`             |
//! | too many operands           | `%!(EXTRA int=1, bool=true)` |
//! | width over 1,000,000        | `%!(BADWIDTH)`, width ignored |
//! | precision over 1,000,000    | `%!(BADPREC)`, precision ignored |

use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

use serde_json::{Number, Value};

use crate::message::Arg;

/// Largest accepted width or precision.
const MAX_FIELD: usize = 1_000_000;

/// Largest precision `std::fmt` accepts; float digits past it are zeros.
const FMT_PRECISION_LIMIT: usize = u16::MAX as usize;

#[derive(Debug, Default)]
struct Spec {
    minus: bool,
    plus: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
}

impl Spec {
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Self {
        let mut spec = Self::default();
        while let Some(flag) = chars.next_if(|c| matches!(*c, '-' | '+' | '0' | ' ' | '#')) {
            match flag {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                '0' => spec.zero = true,
                _ => {}
            }
        }
        match parse_number(chars) {
            Some(width) if width > MAX_FIELD => spec.bad_width = true,
            width => spec.width = width,
        }
        if chars.next_if_eq(&'.').is_some() {
            match parse_number(chars).unwrap_or(0) {
                precision if precision > MAX_FIELD => spec.bad_precision = true,
                precision => spec.precision = Some(precision),
            }
        }
        spec
    }

    fn markers(&self, out: &mut String) {
        if self.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if self.bad_precision {
            out.push_str("%!(BADPREC)");
        }
    }

    fn pad(&self, text: String, numeric: bool) -> String {
        let len = text.chars().count();
        let Some(width) = self.width.filter(|w| *w > len) else {
            return text;
        };
        let fill = width - len;
        if self.minus {
            format!("{text}{}", " ".repeat(fill))
        } else if self.zero && numeric {
            let (sign, digits) = match text.strip_prefix(['-', '+']) {
                Some(rest) => (&text[..1], rest),
                None => ("", text.as_str()),
            };
            format!("{sign}{}{digits}", "0".repeat(fill))
        } else {
            format!("{}{text}", " ".repeat(fill))
        }
    }

    fn signed(&self, text: String) -> String {
        if self.plus && !text.starts_with('-') {
            format!("+{text}")
        } else {
            text
        }
    }
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        let d = digit.to_digit(10).unwrap_or(0) as usize;
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d));
    }
    value
}

/// Format `template`, consuming `operands` in order.
pub fn sprintf(template: &str, operands: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut operands = operands.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let spec = Spec::parse(&mut chars);
        spec.markers(&mut out);
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        match operands.next() {
            None => {
                let _ = write!(out, "%!{verb}(MISSING)");
            }
            Some(arg) => match render(verb, &spec, arg) {
                Some(text) => out.push_str(&spec.pad(text, is_numeric_verb(verb))),
                None => bad_operand(&mut out, verb, arg),
            },
        }
    }

    let extra: Vec<String> = operands.map(describe).collect();
    if !extra.is_empty() {
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }
    out
}

fn is_numeric_verb(verb: char) -> bool {
    matches!(verb, 'd' | 'f' | 'F' | 'e' | 'x' | 'X' | 'o' | 'b')
}

fn describe(arg: &Arg) -> String {
    if arg.is_absent() {
        "<nil>".to_string()
    } else {
        format!("{}={arg}", arg.type_name())
    }
}

fn bad_operand(out: &mut String, verb: char, arg: &Arg) {
    let _ = write!(out, "%!{verb}({})", describe(arg));
}

fn number(arg: &Arg) -> Option<&Number> {
    match arg {
        Arg::Value(Value::Number(n)) => Some(n),
        _ => None,
    }
}

fn integer(arg: &Arg) -> Option<i128> {
    let n = number(arg)?;
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn float(arg: &Arg) -> Option<f64> {
    number(arg).filter(|n| n.is_f64()).and_then(Number::as_f64)
}

fn render(verb: char, spec: &Spec, arg: &Arg) -> Option<String> {
    match verb {
        'v' => Some(arg.to_string()),
        's' => {
            let s = arg.as_str()?;
            Some(match spec.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s.to_string(),
            })
        }
        'q' => serde_json::to_string(arg.as_str()?).ok(),
        'd' => integer(arg).map(|i| spec.signed(i.to_string())),
        'f' | 'F' => {
            let f = float(arg)?;
            Some(spec.signed(fixed(f, spec.precision.unwrap_or(6))))
        }
        'e' => {
            let f = float(arg)?;
            Some(spec.signed(exponent(f, spec.precision.unwrap_or(6))))
        }
        't' => match arg {
            Arg::Value(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        },
        'x' | 'X' => {
            let text = match (integer(arg), arg.as_str()) {
                (Some(i), _) => radix(i, |u| format!("{u:x}")),
                (None, Some(s)) => s.bytes().fold(String::new(), |mut acc, b| {
                    let _ = write!(acc, "{b:02x}");
                    acc
                }),
                (None, None) => return None,
            };
            Some(if verb == 'X' {
                text.to_uppercase()
            } else {
                text
            })
        }
        'o' => integer(arg).map(|i| radix(i, |u| format!("{u:o}"))),
        'b' => integer(arg).map(|i| radix(i, |u| format!("{u:b}"))),
        _ => None,
    }
}

fn radix(value: i128, digits: impl Fn(u128) -> String) -> String {
    if value < 0 {
        format!("-{}", digits(value.unsigned_abs()))
    } else {
        digits(value.unsigned_abs())
    }
}

/// Trailing zeros a finite float needs past what `std::fmt` can render.
fn zero_tail(value: f64, precision: usize) -> (usize, String) {
    let shown = precision.min(FMT_PRECISION_LIMIT);
    let tail = if value.is_finite() {
        "0".repeat(precision - shown)
    } else {
        String::new()
    };
    (shown, tail)
}

/// Fixed-point notation (`1.500000`).
fn fixed(value: f64, precision: usize) -> String {
    let (shown, tail) = zero_tail(value, precision);
    format!("{value:.shown$}{tail}")
}

/// Scientific notation with a signed, two-digit exponent (`1.500000e+03`).
fn exponent(value: f64, precision: usize) -> String {
    let (shown, tail) = zero_tail(value, precision);
    let formatted = format!("{value:.shown$e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}{tail}e{sign}{:02}", exp.unsigned_abs())
        }
        None => formatted,
    }
}
