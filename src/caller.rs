//! Caller tracing.
//!
//! Walks the current stack with [`backtrace`], skips the unwinder and this
//! library's own logging frames, then skips [`CallerDepth`] more frames and
//! reports the location and function of the frame it lands on.
//!
//! Results depend on symbol information being available in the binary. When
//! it is not, or the stack is too shallow, both fields are `None`.

use backtrace::{Backtrace, BacktraceSymbol};

/// Number of application frames to skip above the logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallerDepth(pub usize);

impl CallerDepth {
    /// Report the function that called the logger.
    pub const DIRECT: Self = Self(0);
    /// Report the caller of a single shared logging wrapper.
    pub const SINGLE_ENTRY_POINT: Self = Self(1);
}

/// Location of a log call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    /// `path/to/file.rs:line`
    pub file: Option<String>,
    /// Demangled function path, without hash.
    pub function: Option<String>,
}

const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Modules whose frames sit between the call site and the tracer.
const LIBRARY_MODULES: &[&str] = &["caller::", "logger::", "global::"];

fn is_unwinder_frame(name: &str) -> bool {
    name.trim_start_matches('<').starts_with("backtrace::")
}

fn is_library_frame(name: &str) -> bool {
    name.trim_start_matches('<')
        .strip_prefix(CRATE_PREFIX)
        .is_some_and(|rest| {
            LIBRARY_MODULES.iter().any(|m| rest.starts_with(m)) && !rest.contains("::tests::")
        })
}

/// Trace the call site `depth` frames above the logging call.
#[inline(never)]
pub fn trace(depth: CallerDepth) -> Caller {
    let backtrace = Backtrace::new();
    let mut entered = false;
    let mut left = false;
    let mut remaining = depth.0;

    for symbol in backtrace.frames().iter().flat_map(|f| f.symbols()) {
        let Some(name) = symbol.name().map(|n| format!("{n:#}")) else {
            continue;
        };
        if !left {
            if is_unwinder_frame(&name) {
                continue;
            }
            if is_library_frame(&name) {
                entered = true;
                continue;
            }
            if !entered {
                continue;
            }
            left = true;
        }
        if remaining > 0 {
            remaining -= 1;
            continue;
        }
        return Caller {
            file: location(symbol),
            function: Some(name),
        };
    }

    Caller::default()
}

fn location(symbol: &BacktraceSymbol) -> Option<String> {
    let file = symbol.filename()?;
    Some(match symbol.lineno() {
        Some(line) => format!("{}:{line}", file.display()),
        None => file.display().to_string(),
    })
}
