//! The process-wide logger.
//!
//! A single [`Logger`] created on first use with default settings. Configure
//! it once at startup with [`configure`] or [`set_configs`], then log from
//! anywhere through the free functions here or the level macros.
//!
//! Logging from inside a [`configure`] closure deadlocks: the closure holds
//! the write lock.

use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::config::Configs;
use crate::error::NoodlogError;
use crate::level::Level;
use crate::logger::Logger;
use crate::message::Args;

static LOGGER: LazyLock<RwLock<Logger>> = LazyLock::new(|| RwLock::new(Logger::new()));

/// Mutate the process-wide logger.
///
/// ```
/// noodlog::global::configure(|logger| {
///     logger.set_level("debug").set_pretty_print(true);
/// });
/// ```
pub fn configure<R>(f: impl FnOnce(&mut Logger) -> R) -> R {
    f(&mut *LOGGER.write())
}

/// Apply `configs` to the process-wide logger.
pub fn set_configs(configs: Configs) -> Result<(), NoodlogError> {
    LOGGER.write().set_configs(configs).map(|_| ())
}

/// Run `f` with shared access to the process-wide logger.
pub fn with<R>(f: impl FnOnce(&Logger) -> R) -> R {
    f(&*LOGGER.read())
}

pub fn trace(args: impl Into<Args>) {
    with(|logger| logger.trace(args));
}

pub fn debug(args: impl Into<Args>) {
    with(|logger| logger.debug(args));
}

pub fn info(args: impl Into<Args>) {
    with(|logger| logger.info(args));
}

pub fn warn(args: impl Into<Args>) {
    with(|logger| logger.warn(args));
}

pub fn error(args: impl Into<Args>) {
    with(|logger| logger.error(args));
}

/// Panic with a composed `panic` record. The lock is released first.
pub fn panic(args: impl Into<Args>) -> ! {
    let record = with(|logger| logger.compose(Level::Panic, args));
    std::panic::panic_any(record)
}

pub fn fatal(args: impl Into<Args>) {
    with(|logger| logger.fatal(args));
}

/// Log at a runtime-chosen level.
pub fn log(level: Level, args: impl Into<Args>) {
    match level {
        Level::Panic => panic(args),
        _ => with(|logger| logger.log(level, args)),
    }
}
