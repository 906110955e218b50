//! Configuration structures and constants for the mig-core library.
//!
//! A [`GatherConfig`] is built once per run (usually by mig-cli from its
//! command-line options) and passed by reference to everything that needs
//! it. There is no process-wide mutable configuration.

mod builder;

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::sources::ProbeSource;

pub use builder::GatherConfigBuilder;

/// Default exiftool executable, resolved through `PATH`.
pub const DEFAULT_EXIFTOOL_CMD_PATH: &str = "exiftool";

/// Default ffprobe executable, resolved through `PATH`.
pub const DEFAULT_FFPROBE_CMD_PATH: &str = "ffprobe";

/// Default mediainfo executable, resolved through `PATH`.
pub const DEFAULT_MEDIAINFO_CMD_PATH: &str = "mediainfo";

/// libmagic front end used when content sniffing cannot identify a file.
pub const DEFAULT_FILE_CMD_PATH: &str = "file";

/// Main configuration structure for a gathering run.
///
/// # Examples
///
/// ```rust
/// use mig_core::config::GatherConfigBuilder;
/// use mig_core::ProbeSource;
///
/// let config = GatherConfigBuilder::new()
///     .ffprobe_cmd_path("/opt/ffmpeg/bin/ffprobe")
///     .enabled_sources(vec![ProbeSource::Ffprobe, ProbeSource::Mediainfo])
///     .output_file("/tmp/clip.json")
///     .build();
///
/// assert!(config.is_enabled(ProbeSource::Ffprobe));
/// assert!(!config.is_enabled(ProbeSource::Exiftool));
/// ```
#[derive(Debug, Clone)]
pub struct GatherConfig {
    /// Path to the exiftool executable
    pub exiftool_cmd_path: PathBuf,

    /// Path to the ffprobe executable
    pub ffprobe_cmd_path: PathBuf,

    /// Path to the mediainfo executable
    pub mediainfo_cmd_path: PathBuf,

    /// Path to the `file` executable used as the MIME sniffing fallback
    pub file_cmd_path: PathBuf,

    /// Sources to run; anything not listed is left out of the report
    pub enabled_sources: Vec<ProbeSource>,

    /// When set, the pretty-printed report is also written here
    pub output_file: Option<PathBuf>,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            exiftool_cmd_path: PathBuf::from(DEFAULT_EXIFTOOL_CMD_PATH),
            ffprobe_cmd_path: PathBuf::from(DEFAULT_FFPROBE_CMD_PATH),
            mediainfo_cmd_path: PathBuf::from(DEFAULT_MEDIAINFO_CMD_PATH),
            file_cmd_path: PathBuf::from(DEFAULT_FILE_CMD_PATH),
            enabled_sources: ProbeSource::ALL.to_vec(),
            output_file: None,
        }
    }
}

impl GatherConfig {
    /// Returns true when `source` should be run.
    #[must_use]
    pub fn is_enabled(&self, source: ProbeSource) -> bool {
        self.enabled_sources.contains(&source)
    }

    /// Checks that every command path is usable as a program name.
    pub fn validate(&self) -> CoreResult<()> {
        let commands = [
            ("exiftool", &self.exiftool_cmd_path),
            ("ffprobe", &self.ffprobe_cmd_path),
            ("mediainfo", &self.mediainfo_cmd_path),
            ("file", &self.file_cmd_path),
        ];
        for (name, path) in commands {
            if path.as_os_str().is_empty() {
                return Err(CoreError::Config(format!(
                    "{} command path must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_every_source() {
        let config = GatherConfig::default();
        for source in ProbeSource::ALL {
            assert!(config.is_enabled(source));
        }
        assert!(config.output_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_command_path_is_rejected() {
        let config = GatherConfig {
            mediainfo_cmd_path: PathBuf::new(),
            ..GatherConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mediainfo"));
    }
}
