// ============================================================================
// mig-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern Dispatch for Console and File Output
//
// Library code logs through the `log` facade only. This module installs the
// global logger for the binary: an optional console dispatch (stdout or
// stderr) and an optional log file opened in append mode. Each line carries
// a local timestamp and the level; console levels are coloured when the
// target is a terminal and NO_COLOR is not set.

// ---- Internal crate imports ----
use crate::cli::ConsoleTarget;
use crate::error::{CliError, CliResult};

// ---- External crate imports ----
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;

// ---- Standard library imports ----
use std::io::IsTerminal;
use std::path::Path;

/// Timestamp format used on every log line.
const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Returns the current local time formatted for log lines.
pub fn get_timestamp() -> String {
    chrono::Local::now().format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color(target: ConsoleTarget) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match target {
        ConsoleTarget::Stdout => std::io::stdout().is_terminal(),
        ConsoleTarget::Stderr => std::io::stderr().is_terminal(),
    }
}

fn colored_level(level: Level) -> String {
    match level {
        Level::Error => level.red().bold().to_string(),
        Level::Warn => level.yellow().to_string(),
        Level::Info => level.green().to_string(),
        Level::Debug => level.cyan().to_string(),
        Level::Trace => level.dimmed().to_string(),
    }
}

/// Installs the global logger.
///
/// With neither a console target nor a log file, only the level filter is
/// set and every record is dropped.
pub fn init_logging(
    level: LevelFilter,
    console: Option<ConsoleTarget>,
    log_file: Option<&Path>,
) -> CliResult<()> {
    let mut dispatch = fern::Dispatch::new().level(level);

    if let Some(target) = console {
        let use_color = should_use_color(target);
        let console_dispatch = fern::Dispatch::new().format(move |out, message, record| {
            let level = if use_color {
                colored_level(record.level())
            } else {
                record.level().to_string()
            };
            out.finish(format_args!(
                "[{} {} {}] {}",
                get_timestamp(),
                level,
                record.target(),
                message
            ))
        });
        dispatch = match target {
            ConsoleTarget::Stdout => dispatch.chain(console_dispatch.chain(std::io::stdout())),
            ConsoleTarget::Stderr => dispatch.chain(console_dispatch.chain(std::io::stderr())),
        };
    }

    if let Some(path) = log_file {
        let file = fern::log_file(path).map_err(|source| CliError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        let file_dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    get_timestamp(),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .chain(file);
        dispatch = dispatch.chain(file_dispatch);
    }

    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = get_timestamp();
        // 2024-06-01T12:30:45.123
        assert_eq!(ts.len(), 23);
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn test_unopenable_log_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("mig.log");

        let err = init_logging(LevelFilter::Debug, None, Some(&path)).unwrap_err();

        assert!(matches!(err, CliError::LogFile { .. }));
        assert!(err.to_string().contains("mig.log"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_colored_level_keeps_level_name() {
        assert!(colored_level(Level::Warn).contains("WARN"));
        assert!(colored_level(Level::Error).contains("ERROR"));
    }
}
