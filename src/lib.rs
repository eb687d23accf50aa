//! `noodlog`: structured JSON logging.
//!
//! Every log call produces exactly one JSON record written to a sink:
//!
//! ```json
//! {"level":"info","message":{"user":"ann","password":"**********"},"time":"2026-01-15 10:30:00"}
//! ```
//!
//! Messages are normalized from the call's arguments: a single JSON string is
//! embedded as structured data, several arguments are formatted `printf`-style
//! or joined with spaces. Sensitive fields can be masked, records can carry
//! the caller's file and function, be indented, or be colored by level.
//!
//! # Example
//!
//! ```
//! use noodlog::{Level, Logger, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let mut logger = Logger::new();
//! logger
//!     .set_writer(buffer.clone())
//!     .set_threshold(Level::Debug)
//!     .enable_redaction(["password"]);
//!
//! logger.debug(r#"{"name": "gyoza", "password": "Sup3rS3cr3t"}"#);
//! logger.trace("below the threshold");
//!
//! let out = buffer.contents();
//! assert!(out.contains(r#""level":"debug""#));
//! assert!(out.contains(r#""password":"**********""#));
//! assert_eq!(buffer.lines().len(), 1);
//! ```
//!
//! The process-wide logger is reached through [`global`] or the level macros
//! ([`info!`], [`warn!`], ...).

pub mod caller;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod formatter;
pub mod global;
pub mod level;
pub mod logger;
mod macros;
pub mod message;
pub mod printf;
pub mod redact;
pub mod sink;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use caller::{Caller, CallerDepth};
pub use color::{Color, ColorSpec, Paint};
pub use config::{Configs, CustomColors};
pub use error::NoodlogError;
pub use formatter::Record;
pub use level::Level;
pub use logger::{EXIT_ON_FATAL_DISABLED, Logger};
pub use message::{Arg, Args};
pub use redact::{MASK, Redactor};
pub use sink::{Output, SharedBuffer, Sink};
pub use timestamp::TimeFormat;
