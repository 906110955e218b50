// ============================================================================
// mig-core/src/gather.rs
// ============================================================================
//
// GATHERING: Orchestration of One Metadata Run
//
// This module runs the enabled probe sources against one file and assembles
// their records, the resolved media type and the common variables into a
// MetadataReport.
//
// WORKFLOW:
// 1. Fail fast when the input file does not exist
// 2. Run the enabled sources in order: filemagic, mediainfo, ffprobe, exiftool
// 3. Turn any source failure into an error placeholder in the report
// 4. Resolve the media type and reconcile the common variables
// 5. Write the pretty-printed report to the configured output file

// ---- Internal crate imports ----
use crate::config::GatherConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{ProbeExecutor, SystemProbeExecutor};
use crate::processing::{
    CommonVariables, ExiftoolRecord, FfprobeRecord, MediaCategory, MediaTypeGuess,
    MediainfoRecord, MetadataSources, common_variables, parse_exiftool_output,
    parse_mediainfo_bytes, resolve_media_type,
};
use crate::sources::ProbeSource;
use crate::utils::decode_text;

// ---- External crate imports ----
use serde::ser::{Serialize, SerializeMap, Serializer};

// ---- Standard library imports ----
use std::error::Error as StdError;
use std::fs;
use std::path::Path;
use std::time::Instant;

// ============================================================================
// SOURCE OUTCOMES
// ============================================================================

/// Details of a source that failed, as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceFailure {
    pub message: String,
    /// The error's chain of underlying causes, outermost first.
    pub backtrace: Vec<String>,
}

impl SourceFailure {
    #[must_use]
    pub fn from_error(err: &CoreError) -> Self {
        let mut backtrace = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            backtrace.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: err.to_string(),
            backtrace,
        }
    }
}

/// What one probe source contributed to a report.
#[derive(Debug, Clone)]
pub enum SourceOutcome<T> {
    Collected(T),
    Failed(SourceFailure),
}

impl<T> SourceOutcome<T> {
    fn from_result(source: ProbeSource, result: CoreResult<T>) -> Self {
        match result {
            Ok(record) => SourceOutcome::Collected(record),
            Err(err) => {
                log::warn!("{} failed: {}", source.display_name(), err);
                SourceOutcome::Failed(SourceFailure::from_error(&err))
            }
        }
    }

    /// The record, when the source succeeded.
    pub fn collected(&self) -> Option<&T> {
        match self {
            SourceOutcome::Collected(record) => Some(record),
            SourceOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&SourceFailure> {
        match self {
            SourceOutcome::Collected(_) => None,
            SourceOutcome::Failed(failure) => Some(failure),
        }
    }
}

impl<T: Serialize> Serialize for SourceOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SourceOutcome::Collected(record) => record.serialize(serializer),
            SourceOutcome::Failed(failure) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", failure)?;
                map.end()
            }
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Everything gathered about one file.
///
/// Serializes as `{filemagic, mediainfo, ffprobe, exiftool, media_type,
/// common}`; sources that were not enabled are left out.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetadataReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filemagic: Option<MediaTypeGuess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediainfo: Option<SourceOutcome<MediainfoRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffprobe: Option<SourceOutcome<FfprobeRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exiftool: Option<SourceOutcome<ExiftoolRecord>>,
    pub media_type: Option<MediaTypeGuess>,
    pub common: CommonVariables,
}

impl MetadataReport {
    /// Pretty-printed JSON form of the report.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes the pretty-printed report to `path`, replacing any existing file.
pub fn write_report(report: &MetadataReport, path: &Path) -> CoreResult<()> {
    let json = report.to_json_pretty()?;
    fs::write(path, json)?;
    log::debug!("Wrote metadata report to {}", path.display());
    Ok(())
}

// ============================================================================
// GATHERER
// ============================================================================

/// Runs the configured probe sources for one file at a time.
///
/// # Examples
///
/// ```rust,no_run
/// use mig_core::{GatherConfig, Gatherer};
/// use std::path::Path;
///
/// let gatherer = Gatherer::new(GatherConfig::default());
/// let report = gatherer.run(Path::new("/media/clip.mov")).unwrap();
/// println!("{}", report.to_json_pretty().unwrap());
/// ```
pub struct Gatherer<E: ProbeExecutor = SystemProbeExecutor> {
    config: GatherConfig,
    executor: E,
}

impl Gatherer<SystemProbeExecutor> {
    /// Gatherer that runs the real tools named in `config`.
    #[must_use]
    pub fn new(config: GatherConfig) -> Self {
        let executor = SystemProbeExecutor::new(&config);
        Self { config, executor }
    }
}

impl<E: ProbeExecutor> Gatherer<E> {
    pub fn with_executor(config: GatherConfig, executor: E) -> Self {
        Self { config, executor }
    }

    #[must_use]
    pub fn config(&self) -> &GatherConfig {
        &self.config
    }

    /// Gathers metadata for `path`.
    ///
    /// Only a missing input file, an unusable configuration or a failure to
    /// write the output file is an error; failing sources are recorded in the
    /// report instead.
    pub fn run(&self, path: &Path) -> CoreResult<MetadataReport> {
        self.config.validate()?;
        if !path.exists() {
            return Err(CoreError::InputNotFound(path.to_path_buf()));
        }

        let gathering_start = Instant::now();
        log::debug!("Gathering metadata for file: {}", path.display());

        let mut report = MetadataReport::default();
        for source in ProbeSource::RUN_ORDER {
            if !self.config.is_enabled(source) {
                log::debug!("Skipping {} (not enabled)", source.display_name());
                continue;
            }
            self.run_source(source, path, &mut report);
        }

        report.media_type = resolve_media_type(
            report.filemagic.as_ref(),
            report.exiftool.as_ref().and_then(SourceOutcome::collected),
        );
        report.common = common_variables(
            MetadataSources {
                ffprobe: report.ffprobe.as_ref().and_then(SourceOutcome::collected),
                mediainfo: report.mediainfo.as_ref().and_then(SourceOutcome::collected),
            },
            MediaCategory::Video,
        );

        log::debug!(
            "Metadata gathering completed. Took: {:.3} seconds",
            gathering_start.elapsed().as_secs_f64()
        );

        if let Some(output_file) = &self.config.output_file {
            write_report(&report, output_file)?;
        }

        Ok(report)
    }

    fn run_source(&self, source: ProbeSource, path: &Path, report: &mut MetadataReport) {
        log::debug!("Running {}.", source.display_name());
        let start = Instant::now();

        match source {
            ProbeSource::FileMagic => {
                report.filemagic = Some(self.executor.sniff_media_type(path));
            }
            ProbeSource::Mediainfo => {
                let result = self
                    .executor
                    .mediainfo(path)
                    .map(|output| parse_mediainfo_bytes(output.stdout));
                report.mediainfo = Some(SourceOutcome::from_result(source, result));
            }
            ProbeSource::Ffprobe => {
                let result = self.executor.ffprobe(path).map(|output| {
                    FfprobeRecord::from_output(path, output.command, decode_text(output.stdout))
                });
                report.ffprobe = Some(SourceOutcome::from_result(source, result));
            }
            ProbeSource::Exiftool => {
                let result = self
                    .executor
                    .exiftool(path)
                    .and_then(|output| parse_exiftool_output(output.stdout));
                report.exiftool = Some(SourceOutcome::from_result(source, result));
            }
        }

        log::debug!(
            "{} took {:.3} seconds",
            source.display_name(),
            start.elapsed().as_secs_f64()
        );
    }
}

/// Gathers metadata for `path` with the real tools named in `config`.
pub fn gather(path: &Path, config: &GatherConfig) -> CoreResult<MetadataReport> {
    Gatherer::new(config.clone()).run(path)
}
