use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use clap::Parser;

use noodlog::cli::{Cli, ColorMode};
use noodlog::config::Configs;
use noodlog::{Arg, Args, Logger, NoodlogError};

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so a closed downstream pipe ends
    // noodlog quietly instead of surfacing write errors.
    reset_sigpipe();

    let cli = Cli::parse();

    let mut configs = match Configs::from_cli(&cli) {
        Ok(configs) => configs,
        Err(e) => return fail(&e),
    };
    if configs.colors.is_none() {
        configs.colors = Some(resolve_color_mode(cli.color));
    }

    let mut logger = Logger::new();
    if let Err(e) = logger.set_configs(configs) {
        return fail(&e);
    }

    if !cli.message.is_empty() {
        let args: Args = cli.message.iter().map(Arg::from).collect();
        logger.log(cli.level, args);
        return ExitCode::SUCCESS;
    }

    let stdin = io::stdin();
    for line_result in stdin.lock().lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => return fail(&NoodlogError::Io(e)),
        };
        if line.trim().is_empty() {
            continue;
        }
        logger.log(cli.level, line);
    }

    ExitCode::SUCCESS
}

fn fail(err: &NoodlogError) -> ExitCode {
    eprintln!("noodlog: {err}");
    ExitCode::from(err.exit_code())
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if !io::stdout().is_terminal() {
                return false;
            }
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            !std::env::var("TERM").is_ok_and(|v| v == "dumb")
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors,
/// which the logger would silently drop line after line.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
