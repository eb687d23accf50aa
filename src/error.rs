//! Error types for `noodlog`.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Logging itself never
//! fails; only the file-facing setup operations return these errors.

use thiserror::Error;

/// Errors that can occur while setting up a logger.
///
/// Maps to CLI exit codes: [`Config`](Self::Config) and
/// [`Toml`](Self::Toml) → exit 1, [`Io`](Self::Io) → exit 2.
#[derive(Debug, Error)]
pub enum NoodlogError {
    /// Configuration error (unreadable config file, unusable output target).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while opening or writing an output target.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl NoodlogError {
    /// Process exit code for the `noodlog` binary.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Toml(_) => 1,
            Self::Io(_) => 2,
        }
    }
}
