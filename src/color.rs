//! Terminal color resolution.
//!
//! Resolves palette names and RGB triples to ANSI SGR escape codes using
//! [`owo_colors`]' color types. Anything that cannot be resolved (unknown
//! name, channel outside `0..=255`) resolves to the reset code instead of
//! failing.

use std::fmt;

use owo_colors::{AnsiColors, DynColor, Rgb};
use serde::Deserialize;

/// ANSI reset code.
pub const RESET: &str = "\x1b[0m";

/// A resolved escape code, possibly a foreground followed by a background.
///
/// Two colors are equal when their resolved codes are equal, regardless of
/// how they were named. Deserializes from a [`ColorSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "ColorSpec")]
pub struct Color {
    code: String,
}

impl Color {
    /// The reset/neutral color.
    pub fn reset() -> Self {
        Self {
            code: RESET.to_string(),
        }
    }

    /// Foreground color from a palette name.
    pub fn named(name: &str) -> Self {
        Self {
            code: resolve_name(name),
        }
    }

    /// True-color foreground.
    pub fn rgb(r: i64, g: i64, b: i64) -> Self {
        Self {
            code: resolve_rgb(r, g, b),
        }
    }

    /// Append a palette background to this color.
    #[must_use]
    pub fn background(mut self, name: &str) -> Self {
        self.code.push_str(&resolve_background_name(name));
        self
    }

    /// Append a true-color background to this color.
    #[must_use]
    pub fn background_rgb(mut self, r: i64, g: i64, b: i64) -> Self {
        self.code.push_str(&resolve_background_rgb(r, g, b));
        self
    }

    /// The escape code string.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Wrap `text` between this color and the reset code.
    pub fn paint(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.code.len() + text.len() + RESET.len());
        out.push_str(&self.code);
        out.push_str(text);
        out.push_str(RESET);
        out
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::reset()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Palette lookup. `None` for `default` and unknown names.
fn palette(name: &str) -> Option<AnsiColors> {
    match name.trim().to_lowercase().as_str() {
        "black" => Some(AnsiColors::Black),
        "red" => Some(AnsiColors::Red),
        "green" => Some(AnsiColors::Green),
        "yellow" => Some(AnsiColors::Yellow),
        "blue" => Some(AnsiColors::Blue),
        "purple" | "magenta" => Some(AnsiColors::Magenta),
        "cyan" => Some(AnsiColors::Cyan),
        "white" => Some(AnsiColors::White),
        _ => None,
    }
}

fn channels(r: i64, g: i64, b: i64) -> Option<Rgb> {
    Some(Rgb(
        u8::try_from(r).ok()?,
        u8::try_from(g).ok()?,
        u8::try_from(b).ok()?,
    ))
}

struct Foreground<C>(C);

impl<C: DynColor> fmt::Display for Foreground<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_ansi_fg(f)
    }
}

struct Background<C>(C);

impl<C: DynColor> fmt::Display for Background<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_ansi_bg(f)
    }
}

/// Foreground escape code for a palette name.
pub fn resolve_name(name: &str) -> String {
    palette(name).map_or_else(|| RESET.to_string(), |c| Foreground(c).to_string())
}

/// Background escape code for a palette name.
pub fn resolve_background_name(name: &str) -> String {
    palette(name).map_or_else(|| RESET.to_string(), |c| Background(c).to_string())
}

/// True-color foreground escape code (`\x1b[38;2;r;g;bm`).
pub fn resolve_rgb(r: i64, g: i64, b: i64) -> String {
    channels(r, g, b).map_or_else(|| RESET.to_string(), |c| Foreground(c).to_string())
}

/// True-color background escape code (`\x1b[48;2;r;g;bm`).
pub fn resolve_background_rgb(r: i64, g: i64, b: i64) -> String {
    channels(r, g, b).map_or_else(|| RESET.to_string(), |c| Background(c).to_string())
}

/// A single color as written in a config file: a palette name or an RGB
/// triple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    Name(String),
    Rgb { rgb: [i64; 3] },
}

impl Paint {
    fn foreground(&self) -> Color {
        match self {
            Self::Name(name) => Color::named(name),
            Self::Rgb { rgb: [r, g, b] } => Color::rgb(*r, *g, *b),
        }
    }

    fn apply_background(&self, color: Color) -> Color {
        match self {
            Self::Name(name) => color.background(name),
            Self::Rgb { rgb: [r, g, b] } => color.background_rgb(*r, *g, *b),
        }
    }
}

/// A color override as written in a config file.
///
/// ```toml
/// trace = "blue"
/// debug = { rgb = [120, 200, 80] }
/// error = { foreground = "white", background = "red" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Composed { foreground: Paint, background: Paint },
    Single(Paint),
}

impl ColorSpec {
    /// Resolve to an escape code.
    pub fn resolve(&self) -> Color {
        match self {
            Self::Single(paint) => paint.foreground(),
            Self::Composed {
                foreground,
                background,
            } => background.apply_background(foreground.foreground()),
        }
    }
}

impl From<ColorSpec> for Color {
    fn from(spec: ColorSpec) -> Self {
        spec.resolve()
    }
}
