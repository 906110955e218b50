//! Error types for mig-core.
//!
//! Every fallible operation in the library returns [`CoreResult`]. Probe
//! sources that fail are not fatal for a run: the gatherer turns their
//! `CoreError` into an error placeholder in the report instead.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for mig-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File Not Found. File Path: '{}'", .0.display())]
    InputNotFound(PathBuf),

    #[error("Required external tool '{0}' was not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Command '{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Unexpected {tool} output: {message}")]
    UnexpectedOutput { tool: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to serialize metadata report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for mig-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds the error for a command that could not be spawned.
///
/// A missing binary is reported as [`CoreError::DependencyNotFound`] so the
/// report tells the user which tool to install or point at.
pub fn command_start_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    let command = command.into();
    if err.kind() == std::io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(command)
    } else {
        CoreError::CommandStart(command, err)
    }
}

/// Builds the error for a command that ran but exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_maps_to_dependency_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let mapped = command_start_error("mediainfo", err);
        assert!(matches!(mapped, CoreError::DependencyNotFound(ref name) if name == "mediainfo"));
    }

    #[test]
    fn test_other_spawn_errors_keep_source() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let mapped = command_start_error("ffprobe", err);
        assert!(matches!(mapped, CoreError::CommandStart(ref name, _) if name == "ffprobe"));
        assert!(std::error::Error::source(&mapped).is_some());
    }

    #[test]
    fn test_input_not_found_message() {
        let err = CoreError::InputNotFound(PathBuf::from("/nope/clip.mov"));
        assert_eq!(err.to_string(), "File Not Found. File Path: '/nope/clip.mov'");
    }
}
