//! The logger: configuration plus the per-level log operations.
//!
//! Every log call runs the whole pipeline on the calling thread:
//! threshold check → message normalization (and redaction) → record
//! composition (timestamp, caller, color) → one line written to the sink.
//!
//! Setters take `&mut self` and return `&mut Self` so they chain:
//!
//! ```
//! use noodlog::{Logger, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let mut logger = Logger::new();
//! logger
//!     .set_level("debug")
//!     .set_writer(buffer.clone())
//!     .enable_redaction(["password"]);
//!
//! logger.debug(r#"{"user":"ann","password":"hunter2"}"#);
//! assert!(buffer.contents().contains(r#""password":"**********""#));
//! ```

use std::fmt;
use std::io::Write;

use parking_lot::Mutex;

use crate::caller::{self, CallerDepth};
use crate::color::Color;
use crate::config::{Configs, CustomColors};
use crate::error::NoodlogError;
use crate::formatter::Record;
use crate::level::Level;
use crate::message::{self, Args};
use crate::redact::Redactor;
use crate::sink::{Output, Sink};
use crate::timestamp::TimeFormat;

/// Environment variable that, when set to a non-empty value, keeps
/// [`Logger::fatal`] from terminating the process.
pub const EXIT_ON_FATAL_DISABLED: &str = "EXIT_ON_FATAL_DISABLED";

/// A configured logger.
///
/// Independent instances share nothing. The sink sits behind a mutex, so a
/// logger can be shared by reference across threads for logging; changing
/// its configuration needs `&mut` access.
pub struct Logger {
    threshold: Level,
    sink: Mutex<Sink>,
    pretty: bool,
    trace_caller: bool,
    caller_depth: CallerDepth,
    colors: bool,
    color_map: [Color; 7],
    redact: bool,
    redactor: Redactor,
    time_format: TimeFormat,
    exit_on_fatal: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("pretty", &self.pretty)
            .field("trace_caller", &self.trace_caller)
            .field("caller_depth", &self.caller_depth)
            .field("colors", &self.colors)
            .field("color_map", &self.color_map)
            .field("redact", &self.redact)
            .field("redactor", &self.redactor)
            .field("time_format", &self.time_format)
            .field("exit_on_fatal", &self.exit_on_fatal)
            .finish_non_exhaustive()
    }
}

const fn slot(level: Level) -> usize {
    level.rank() as usize - 1
}

impl Logger {
    /// A logger with defaults: threshold `info`, stdout, compact JSON, no
    /// caller tracing, no colors, no redaction, local time, exit on fatal.
    pub fn new() -> Self {
        Self {
            threshold: Level::Info,
            sink: Mutex::new(Box::new(std::io::stdout())),
            pretty: false,
            trace_caller: false,
            caller_depth: CallerDepth::DIRECT,
            colors: false,
            color_map: Level::ALL.map(Level::default_color),
            redact: false,
            redactor: Redactor::default(),
            time_format: TimeFormat::default(),
            exit_on_fatal: true,
        }
    }

    // ---- configuration ----

    /// Set the threshold by name; unknown names mean `info`.
    pub fn set_level(&mut self, name: &str) -> &mut Self {
        self.threshold = Level::from_name_or_info(name);
        self
    }

    pub fn set_threshold(&mut self, level: Level) -> &mut Self {
        self.threshold = level;
        self
    }

    pub const fn threshold(&self) -> Level {
        self.threshold
    }

    /// Write records to `writer` (a file, a buffer, a socket...).
    pub fn set_writer<W: Write + Send + 'static>(&mut self, writer: W) -> &mut Self {
        *self.sink.get_mut() = Box::new(writer);
        self
    }

    /// Write records to a configured output target.
    pub fn set_output(&mut self, output: &Output) -> Result<&mut Self, NoodlogError> {
        *self.sink.get_mut() = output.open()?;
        Ok(self)
    }

    pub fn set_pretty_print(&mut self, enabled: bool) -> &mut Self {
        self.pretty = enabled;
        self
    }

    pub const fn pretty_print(&self) -> bool {
        self.pretty
    }

    pub fn set_trace_caller(&mut self, enabled: bool) -> &mut Self {
        self.trace_caller = enabled;
        self
    }

    pub const fn trace_caller(&self) -> bool {
        self.trace_caller
    }

    /// Choose between the two caller depth presets.
    pub fn set_single_point_tracing(&mut self, enabled: bool) -> &mut Self {
        self.caller_depth = if enabled {
            CallerDepth::SINGLE_ENTRY_POINT
        } else {
            CallerDepth::DIRECT
        };
        self
    }

    pub fn set_caller_depth(&mut self, depth: CallerDepth) -> &mut Self {
        self.caller_depth = depth;
        self
    }

    pub const fn caller_depth(&self) -> CallerDepth {
        self.caller_depth
    }

    pub fn set_colors(&mut self, enabled: bool) -> &mut Self {
        self.colors = enabled;
        self
    }

    pub const fn colors(&self) -> bool {
        self.colors
    }

    /// Override the colors of the levels set in `colors`.
    pub fn set_custom_colors(&mut self, colors: &CustomColors) -> &mut Self {
        for (level, color) in colors.entries() {
            self.color_map[slot(level)] = color.clone();
        }
        self
    }

    pub fn set_level_color(&mut self, level: Level, color: Color) -> &mut Self {
        self.color_map[slot(level)] = color;
        self
    }

    pub const fn level_color(&self, level: Level) -> &Color {
        &self.color_map[slot(level)]
    }

    /// Toggle redaction without touching the field set.
    pub fn set_redaction(&mut self, enabled: bool) -> &mut Self {
        self.redact = enabled;
        self
    }

    pub const fn redaction(&self) -> bool {
        self.redact
    }

    /// Replace the set of sensitive field names.
    pub fn set_sensitive_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.redactor = Redactor::new(fields);
        self
    }

    pub fn sensitive_fields(&self) -> Vec<&str> {
        self.redactor.fields().collect()
    }

    /// Turn redaction on for `fields`.
    pub fn enable_redaction<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.redact = true;
        self.set_sensitive_fields(fields)
    }

    pub fn set_time_format(&mut self, format: TimeFormat) -> &mut Self {
        self.time_format = format;
        self
    }

    pub const fn time_format(&self) -> &TimeFormat {
        &self.time_format
    }

    /// Whether [`fatal`](Self::fatal) terminates the process.
    pub fn set_exit_on_fatal(&mut self, enabled: bool) -> &mut Self {
        self.exit_on_fatal = enabled;
        self
    }

    pub const fn exit_on_fatal(&self) -> bool {
        self.exit_on_fatal
    }

    /// Apply every option set in `configs`; unset options are left alone.
    ///
    /// Only opening a file output can fail, and then nothing is changed.
    pub fn set_configs(&mut self, configs: Configs) -> Result<&mut Self, NoodlogError> {
        let sink = configs.output.as_ref().map(Output::open).transpose()?;
        if let Some(sink) = sink {
            *self.sink.get_mut() = sink;
        }
        if let Some(level) = configs.level {
            self.set_level(&level);
        }
        if let Some(pretty) = configs.pretty {
            self.set_pretty_print(pretty);
        }
        if let Some(trace) = configs.trace_caller {
            self.set_trace_caller(trace);
        }
        if let Some(single) = configs.single_point_tracing {
            self.set_single_point_tracing(single);
        }
        if let Some(colors) = configs.colors {
            self.set_colors(colors);
        }
        if let Some(custom) = configs.custom_colors {
            self.set_custom_colors(&custom);
        }
        if let Some(redact) = configs.redact {
            self.set_redaction(redact);
        }
        if let Some(fields) = configs.sensitive_fields {
            self.set_sensitive_fields(fields);
        }
        if let Some(time) = configs.time {
            self.set_time_format(time);
        }
        if let Some(exit) = configs.exit_on_fatal {
            self.set_exit_on_fatal(exit);
        }
        Ok(self)
    }

    // ---- logging ----

    /// `true` when records of `level` pass the threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    pub fn trace(&self, args: impl Into<Args>) {
        self.emit(Level::Trace, &args.into());
    }

    pub fn debug(&self, args: impl Into<Args>) {
        self.emit(Level::Debug, &args.into());
    }

    pub fn info(&self, args: impl Into<Args>) {
        self.emit(Level::Info, &args.into());
    }

    pub fn warn(&self, args: impl Into<Args>) {
        self.emit(Level::Warn, &args.into());
    }

    pub fn error(&self, args: impl Into<Args>) {
        self.emit(Level::Error, &args.into());
    }

    /// Compose a `panic` record and panic with it as the payload.
    ///
    /// Nothing is written to the sink and the threshold does not apply. The
    /// payload is a `String` and can be recovered with
    /// [`std::panic::catch_unwind`].
    pub fn panic(&self, args: impl Into<Args>) -> ! {
        std::panic::panic_any(self.compose_args(Level::Panic, &args.into()))
    }

    /// Write a `fatal` record, then exit with status 1.
    ///
    /// The exit is skipped when disabled with
    /// [`set_exit_on_fatal`](Self::set_exit_on_fatal) or through the
    /// `EXIT_ON_FATAL_DISABLED` environment variable.
    pub fn fatal(&self, args: impl Into<Args>) {
        self.emit(Level::Fatal, &args.into());
        if self.exits_on_fatal() {
            std::process::exit(1);
        }
    }

    /// Log at a runtime-chosen level, with that level's panic/exit behavior.
    pub fn log(&self, level: Level, args: impl Into<Args>) {
        match level {
            Level::Panic => self.panic(args),
            Level::Fatal => self.fatal(args),
            _ => self.emit(level, &args.into()),
        }
    }

    /// The rendered record for `args`, regardless of threshold.
    pub fn compose(&self, level: Level, args: impl Into<Args>) -> String {
        self.compose_args(level, &args.into())
    }

    fn exits_on_fatal(&self) -> bool {
        self.exit_on_fatal
            && !std::env::var_os(EXIT_ON_FATAL_DISABLED).is_some_and(|v| !v.is_empty())
    }

    fn emit(&self, level: Level, args: &Args) {
        if !self.enabled(level) {
            return;
        }
        let mut line = self.compose_args(level, args);
        line.push('\n');
        let mut sink = self.sink.lock();
        // Sink failures are not reported; logging is fire-and-forget.
        let _ = sink.write_all(line.as_bytes());
        let _ = sink.flush();
    }

    fn compose_args(&self, level: Level, args: &Args) -> String {
        let redactor = self.redact.then_some(&self.redactor);
        let message = message::normalize(args, redactor);
        let mut record = Record::new(level, message, self.time_format.now());
        if self.trace_caller {
            record = record.with_caller(caller::trace(self.caller_depth));
        }
        let color = self.colors.then(|| self.level_color(level));
        record.render(self.pretty, color)
    }
}
