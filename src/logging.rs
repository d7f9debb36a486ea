//! Logger setup (flexi_logger backend, stderr output)

use anyhow::{Context, Result};
use flexi_logger::{DeferredNow, Logger, LoggerHandle};
use log::Record;
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};

use crate::config;

/// Map `-v` occurrences to a log level
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start the global logger
///
/// `BUILD_STAMP_LOG` takes precedence over the verbosity flag. The returned
/// handle must stay alive for the rest of the program.
pub fn init(verbose: u8) -> Result<LoggerHandle> {
    let spec = std::env::var(config::LOG_SPEC_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| level_for_verbosity(verbose).to_string());

    let mut logger =
        Logger::try_with_str(&spec).with_context(|| format!("Invalid log spec: {}", spec))?;
    logger = if std::io::stderr().is_terminal() {
        logger.format(color_format)
    } else {
        logger.format(plain_format)
    };

    logger.start().context("Failed to start logger")
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn plain_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(w, "{} {}", level_abbr(record.level()), record.args())
}

fn color_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let abbr = level_abbr(record.level());
    match record.level() {
        log::Level::Error => write!(w, "{} {}", abbr.red().bold(), record.args()),
        log::Level::Warn => write!(w, "{} {}", abbr.yellow(), record.args()),
        log::Level::Info => write!(w, "{} {}", abbr.green(), record.args()),
        log::Level::Debug => write!(w, "{} {}", abbr.blue(), record.args()),
        log::Level::Trace => write!(w, "{} {}", abbr.magenta(), record.args()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(7), "trace");
    }
}
