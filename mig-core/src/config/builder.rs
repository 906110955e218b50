// ============================================================================
// mig-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for GatherConfig
//
// Provides a fluent API for creating GatherConfig instances. Every field has
// a default, so a bare `GatherConfigBuilder::new().build()` runs all four
// sources with the tools found on PATH.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::GatherConfig;
use crate::sources::ProbeSource;

/// Builder for creating GatherConfig instances.
///
/// # Examples
///
/// ```rust
/// use mig_core::config::GatherConfigBuilder;
///
/// let config = GatherConfigBuilder::new()
///     .mediainfo_cmd_path("/usr/local/bin/mediainfo")
///     .exiftool_cmd_path("/usr/bin/exiftool")
///     .build();
///
/// assert_eq!(config.mediainfo_cmd_path.to_str(), Some("/usr/local/bin/mediainfo"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GatherConfigBuilder {
    config: GatherConfig,
}

impl GatherConfigBuilder {
    /// Creates a new GatherConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exiftool executable.
    pub fn exiftool_cmd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.exiftool_cmd_path = path.into();
        self
    }

    /// Sets the ffprobe executable.
    pub fn ffprobe_cmd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_cmd_path = path.into();
        self
    }

    /// Sets the mediainfo executable.
    pub fn mediainfo_cmd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.mediainfo_cmd_path = path.into();
        self
    }

    /// Sets the `file` executable used when content sniffing finds nothing.
    pub fn file_cmd_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file_cmd_path = path.into();
        self
    }

    /// Replaces the set of sources to run.
    ///
    /// Duplicates are dropped; the run order is fixed regardless of the order
    /// given here.
    pub fn enabled_sources(mut self, sources: Vec<ProbeSource>) -> Self {
        let mut sources = sources;
        sources.sort();
        sources.dedup();
        self.config.enabled_sources = sources;
        self
    }

    /// Writes the report to `path` in addition to returning it.
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_file = Some(path.into());
        self
    }

    /// Builds a GatherConfig instance from the builder.
    pub fn build(self) -> GatherConfig {
        self.config
    }
}
