use std::{
    io::{self, Write},
    sync::OnceLock,
};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

const DEFAULT_LEVEL: Level = Level::Warn;

/// Minimal stderr logger: `timestamp LEVEL [target] message`.
pub struct StderrLogger {
    level: Level,
}

impl StderrLogger {
    fn format(record: &Record<'_>) -> String {
        format!(
            "{} {:<5} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Nothing useful to do if stderr is gone.
        let _ = writeln!(io::stderr().lock(), "{}", Self::format(record));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install the stderr logger at the level named by `METACACHE_LOG_LEVEL`.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(level_from_env())
}

/// Install the stderr logger. Only the first call has an effect.
pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

    // set_max_level must agree with the level captured by the first get_or_init.
    let init_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| StderrLogger { level });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(logger.level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
