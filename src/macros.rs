//! Logging macros.
//!
//! Each level macro takes the log call's arguments, converted with
//! [`Arg::from`](crate::Arg). Prefix them with `logger: <expr>,` to log
//! through a specific [`Logger`](crate::Logger) instead of the process-wide
//! one:
//!
//! ```
//! use noodlog::{Logger, SharedBuffer, info};
//!
//! let buffer = SharedBuffer::new();
//! let mut logger = Logger::new();
//! logger.set_writer(buffer.clone());
//!
//! info!(logger: logger, "user %s logged in after %d tries", "ann", 3);
//! assert!(buffer.contents().contains("user ann logged in after 3 tries"));
//! ```

/// Build an [`Args`](crate::Args) list from heterogeneous values.
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::default()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::Args::new(::std::vec![$($crate::Arg::from($arg)),+])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($method:ident, logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.$method($crate::args![$($arg),*])
    };
    ($method:ident $(, $arg:expr)* $(,)?) => {
        $crate::global::$method($crate::args![$($arg),*])
    };
}

/// Log at `trace`.
#[macro_export]
macro_rules! trace {
    ($($tt:tt)*) => {
        $crate::__log!(trace, $($tt)*)
    };
}

/// Log at `debug`.
#[macro_export]
macro_rules! debug {
    ($($tt:tt)*) => {
        $crate::__log!(debug, $($tt)*)
    };
}

/// Log at `info`.
#[macro_export]
macro_rules! info {
    ($($tt:tt)*) => {
        $crate::__log!(info, $($tt)*)
    };
}

/// Log at `warn`.
#[macro_export]
macro_rules! warn {
    ($($tt:tt)*) => {
        $crate::__log!(warn, $($tt)*)
    };
}

/// Log at `error`.
#[macro_export]
macro_rules! error {
    ($($tt:tt)*) => {
        $crate::__log!(error, $($tt)*)
    };
}

/// Write a `fatal` record, then exit unless exiting is disabled.
#[macro_export]
macro_rules! fatal {
    ($($tt:tt)*) => {
        $crate::__log!(fatal, $($tt)*)
    };
}

/// Panic with a composed `panic` record.
///
/// Named so it does not shadow [`std::panic!`].
#[macro_export]
macro_rules! log_panic {
    ($($tt:tt)*) => {
        $crate::__log!(panic, $($tt)*)
    };
}
