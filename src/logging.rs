#![cfg(feature = "std")]

use log::{LevelFilter, Metadata, Record};
use std::env;

/// Environment variable consulted when no level is given on the command line.
pub const LOG_ENV: &str = "BROADSIDE_LOG";

/// Writes records to stderr so game output on stdout stays clean.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // Engine records are tagged with their module, e.g. `broadside::board`.
            let target = record.target().trim_start_matches("broadside::");
            eprintln!("[{:<5} {}] {}", record.level(), target, record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Pick the effective level: an explicit override wins, then a parseable
/// environment value, then `info`.
pub fn resolve_level(explicit: Option<LevelFilter>, env_value: Option<&str>) -> LevelFilter {
    explicit
        .or_else(|| env_value.and_then(|v| v.trim().parse().ok()))
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger. `level` comes from `--log-level`; without it the
/// `BROADSIDE_LOG` variable is read. A second call keeps the first logger.
pub fn init_logging(level: Option<LevelFilter>) {
    let from_env = env::var(LOG_ENV).ok();
    let level = resolve_level(level, from_env.as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
    log::debug!("logging at {}", level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_beats_environment() {
        assert_eq!(
            resolve_level(Some(LevelFilter::Warn), Some("trace")),
            LevelFilter::Warn
        );
    }

    #[test]
    fn environment_used_without_override() {
        assert_eq!(resolve_level(None, Some("debug")), LevelFilter::Debug);
        assert_eq!(resolve_level(None, Some(" Error ")), LevelFilter::Error);
        assert_eq!(resolve_level(None, Some("off")), LevelFilter::Off);
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(resolve_level(None, None), LevelFilter::Info);
        assert_eq!(resolve_level(None, Some("loud")), LevelFilter::Info);
    }
}
