//! This module provides a custom Logger implementation for use with the
//! `log` crate. Verbosity is decided once at startup, from the command-line
//! flags or the `PATHMAN_LOGLEVEL` environment variable; everything else in
//! the crate logs through the standard macros.
//!
//! `info!` output is the user-facing progress channel and goes to stdout;
//! errors, warnings, and diagnostics go to stderr. Output consumed by other
//! programs (the dry-run command line, the refresh-script invocation) is
//! printed directly at the call site and never passes through the logger.

use std::env;
use std::fmt::Display;

use console::style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use textwrap::fill;

use crate::style::text_width;

/// Environment variable that overrides the default log level.
pub const PATHMAN_LOGLEVEL: &str = "PATHMAN_LOGLEVEL";

const ERROR_PREFIX: &str = "error:";
const WARNING_PREFIX: &str = "warning:";

/// Only records from pathman's own crates are rendered.
const ALLOWED_PREFIX: &str = "pathman";

/// Log verbosity for an invocation, selected by the global flags.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogVerbosity {
    Quiet,
    Default,
    Verbose,
    VeryVerbose,
}

pub struct Logger {
    level: LevelFilter,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with(ALLOWED_PREFIX)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            match record.level() {
                Level::Error => log_error(record.args()),
                Level::Warn => log_warning(record.args()),
                Level::Debug | Level::Trace => eprintln!("[verbose] {}", record.args()),
                Level::Info => println!("{}", record.args()),
            }
        }
    }

    fn flush(&self) {}
}

impl Logger {
    /// Initialize the global logger with the given verbosity.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger was already installed.
    pub fn init(verbosity: LogVerbosity) -> Result<(), SetLoggerError> {
        let logger = Self::new(verbosity);
        log::set_max_level(logger.level);
        log::set_boxed_logger(Box::new(logger))?;
        Ok(())
    }

    fn new(verbosity: LogVerbosity) -> Self {
        let level = match verbosity {
            LogVerbosity::Quiet => LevelFilter::Error,
            LogVerbosity::Default => level_from_env(),
            LogVerbosity::Verbose => LevelFilter::Debug,
            LogVerbosity::VeryVerbose => LevelFilter::Trace,
        };
        Self { level }
    }
}

/// The level to use when no flag was passed, honoring `PATHMAN_LOGLEVEL`.
fn level_from_env() -> LevelFilter {
    env::var(PATHMAN_LOGLEVEL)
        .ok()
        .and_then(|level| level.to_uppercase().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn log_error<D: Display>(message: &D) {
    eprintln!("{} {}", style(ERROR_PREFIX).red().bold(), wrap_content(message));
}

fn log_warning<D: Display>(message: &D) {
    eprintln!(
        "{} {}",
        style(WARNING_PREFIX).yellow().bold(),
        wrap_content(message)
    );
}

/// Wraps each line of the message to the terminal width, preserving the
/// blank-line structure of multi-paragraph error messages. Returns the
/// message unchanged when not attached to a terminal.
fn wrap_content<D: Display>(content: &D) -> String {
    text_width().map_or_else(
        || content.to_string(),
        |width| {
            content
                .to_string()
                .lines()
                .map(|line| fill(line, width))
                .collect::<Vec<String>>()
                .join("\n")
        },
    )
}
