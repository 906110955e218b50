// ============================================================================
// mig-cli/src/error.rs
// ============================================================================
//
// CLI ERRORS: Failures of the binary around a gathering run
//
// Gathering errors come from mig-core unchanged. The CLI adds the failures
// it can hit on its own: opening the log file, installing the logger and
// printing the report. Each keeps its underlying error as the source.

// ---- External crate imports ----
use mig_core::CoreError;
use thiserror::Error;

// ---- Standard library imports ----
use std::path::PathBuf;

/// Errors that end a `mig` invocation with exit status 1.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to open log file '{}': {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to print metadata report: {0}")]
    Output(#[source] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_core_errors_keep_their_message() {
        let err: CliError = CoreError::InputNotFound(PathBuf::from("clip.mov")).into();
        assert_eq!(err.to_string(), "File Not Found. File Path: 'clip.mov'");
    }

    #[test]
    fn test_log_file_error_keeps_io_source() {
        let err = CliError::LogFile {
            path: PathBuf::from("/var/log/mig.log"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to open log file '/var/log/mig.log': denied"
        );
        let source = err.source().expect("io error kept as source");
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn test_output_error_keeps_io_source() {
        let err = CliError::Output(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert_eq!(err.to_string(), "Failed to print metadata report: pipe closed");
        assert!(err.source().is_some());
    }
}
