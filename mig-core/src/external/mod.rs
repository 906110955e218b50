// ============================================================================
// mig-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the Probe Command-Line Tools
//
// This module encapsulates every interaction with the external probing tools
// (mediainfo, ffprobe, exiftool and the `file` MIME fallback). The gatherer
// only talks to them through the ProbeExecutor trait, so tests can supply
// canned tool output instead of real binaries.
//
// KEY COMPONENTS:
// - ProbeExecutor trait, one method per probe source
// - SystemProbeExecutor, which runs the configured commands
// - run_tool, the shared spawn and exit status handling

// ---- Internal crate imports ----
use crate::config::GatherConfig;
use crate::error::{CoreResult, command_failed_error, command_start_error};
use crate::processing::media_type::MediaTypeGuess;
use crate::utils::format_command;

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// mediainfo text report
pub mod mediainfo_executor;

/// ffprobe JSON report
pub mod ffprobe_executor;

/// exiftool grouped JSON report
pub mod exiftool_executor;

/// Content sniffing with a `file --mime` fallback
pub mod media_type;

/// Canned tool output for tests
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use exiftool_executor::{EXIFTOOL_ARGS, run_exiftool};
pub use ffprobe_executor::{FFPROBE_ARGS, run_ffprobe};
pub use media_type::sniff_media_type;
pub use mediainfo_executor::run_mediainfo;

// ============================================================================
// TOOL OUTPUT
// ============================================================================

/// Captured stdout of a probe tool along with the command line that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub command: String,
    pub stdout: Vec<u8>,
}

/// Runs `program args...`, returning stdout when the process exits successfully.
///
/// A binary that cannot be found is reported as `DependencyNotFound`; a
/// non-zero exit becomes `CommandFailed` carrying the tool's stderr.
pub(crate) fn run_tool(program: &Path, args: &[&OsStr]) -> CoreResult<ToolOutput> {
    let command = format_command(program, args);
    log::debug!("Executing: {}", command);

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| command_start_error(program.to_string_lossy(), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::debug!("{} exited with {}", program.display(), output.status);
        return Err(command_failed_error(command, output.status, stderr));
    }

    log::trace!(
        "{} produced {} bytes of output",
        program.display(),
        output.stdout.len()
    );
    Ok(ToolOutput {
        command,
        stdout: output.stdout,
    })
}

// ============================================================================
// PROBE EXECUTOR
// ============================================================================

/// Runs the probe tools for a file.
///
/// # Examples
///
/// ```rust
/// use mig_core::CoreResult;
/// use mig_core::external::{ProbeExecutor, ToolOutput};
/// use mig_core::processing::MediaTypeGuess;
/// use std::path::Path;
///
/// struct FixedExecutor;
///
/// impl ProbeExecutor for FixedExecutor {
///     fn mediainfo(&self, _path: &Path) -> CoreResult<ToolOutput> {
///         Ok(ToolOutput { command: "mediainfo".into(), stdout: b"General\n".to_vec() })
///     }
///     fn ffprobe(&self, _path: &Path) -> CoreResult<ToolOutput> {
///         Ok(ToolOutput { command: "ffprobe".into(), stdout: b"{}".to_vec() })
///     }
///     fn exiftool(&self, _path: &Path) -> CoreResult<ToolOutput> {
///         Ok(ToolOutput { command: "exiftool".into(), stdout: b"[{}]".to_vec() })
///     }
///     fn sniff_media_type(&self, _path: &Path) -> MediaTypeGuess {
///         MediaTypeGuess::from_mime_type("video/mp4")
///     }
/// }
///
/// let guess = FixedExecutor.sniff_media_type(Path::new("clip.mp4"));
/// assert_eq!(guess.subtype.as_deref(), Some("mp4"));
/// ```
pub trait ProbeExecutor {
    /// `mediainfo <path>`
    fn mediainfo(&self, path: &Path) -> CoreResult<ToolOutput>;

    /// `ffprobe -v quiet -print_format json -show_format -show_streams <path>`
    fn ffprobe(&self, path: &Path) -> CoreResult<ToolOutput>;

    /// `exiftool -g -a -json <path>`
    fn exiftool(&self, path: &Path) -> CoreResult<ToolOutput>;

    /// Best effort MIME guess. Never fails; an unknown file gives an empty guess.
    fn sniff_media_type(&self, path: &Path) -> MediaTypeGuess;
}

/// Runs the real tools at the paths taken from a [`GatherConfig`].
#[derive(Debug, Clone)]
pub struct SystemProbeExecutor {
    exiftool_cmd_path: PathBuf,
    ffprobe_cmd_path: PathBuf,
    mediainfo_cmd_path: PathBuf,
    file_cmd_path: PathBuf,
}

impl SystemProbeExecutor {
    #[must_use]
    pub fn new(config: &GatherConfig) -> Self {
        Self {
            exiftool_cmd_path: config.exiftool_cmd_path.clone(),
            ffprobe_cmd_path: config.ffprobe_cmd_path.clone(),
            mediainfo_cmd_path: config.mediainfo_cmd_path.clone(),
            file_cmd_path: config.file_cmd_path.clone(),
        }
    }
}

impl Default for SystemProbeExecutor {
    fn default() -> Self {
        Self::new(&GatherConfig::default())
    }
}

impl ProbeExecutor for SystemProbeExecutor {
    fn mediainfo(&self, path: &Path) -> CoreResult<ToolOutput> {
        run_mediainfo(&self.mediainfo_cmd_path, path)
    }

    fn ffprobe(&self, path: &Path) -> CoreResult<ToolOutput> {
        run_ffprobe(&self.ffprobe_cmd_path, path)
    }

    fn exiftool(&self, path: &Path) -> CoreResult<ToolOutput> {
        run_exiftool(&self.exiftool_cmd_path, path)
    }

    fn sniff_media_type(&self, path: &Path) -> MediaTypeGuess {
        sniff_media_type(&self.file_cmd_path, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    const MISSING_TOOL: &str = "/nonexistent/bin/mig-missing-tool";

    #[test]
    fn test_missing_binary_is_dependency_not_found() {
        let err = run_tool(Path::new(MISSING_TOOL), &[OsStr::new("x")]).unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(ref name) if name == MISSING_TOOL));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_command_failed() {
        let err = run_tool(
            Path::new("sh"),
            &[OsStr::new("-c"), OsStr::new("echo broken >&2; exit 3")],
        )
        .unwrap_err();

        match err {
            CoreError::CommandFailed { stderr, status, .. } => {
                assert_eq!(stderr, "broken");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_captured() {
        let output = run_tool(Path::new("sh"), &[OsStr::new("-c"), OsStr::new("printf ok")]).unwrap();
        assert_eq!(output.stdout, b"ok");
        assert!(output.command.starts_with("sh -c"));
    }
}
