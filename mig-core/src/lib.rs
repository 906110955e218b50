//! Core library for gathering media file metadata with external probe tools.
//!
//! This crate runs mediainfo, ffprobe, exiftool and MIME sniffing against a
//! file, parses what each tool reports and reconciles the results into one
//! set of common variables (dimensions, frame rate, aspect ratio, video
//! system, codec naming, audio layout).
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mig_core::{GatherConfigBuilder, Gatherer, ProbeSource};
//! use std::path::Path;
//!
//! let config = GatherConfigBuilder::new()
//!     .ffprobe_cmd_path("/opt/ffmpeg/bin/ffprobe")
//!     .enabled_sources(vec![ProbeSource::Ffprobe, ProbeSource::Mediainfo])
//!     .build();
//!
//! let report = Gatherer::new(config).run(Path::new("/media/clip.mov")).unwrap();
//! if let Some(system) = report.common.video_system {
//!     println!("Video system: {}", system);
//! }
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod gather;
pub mod processing;
pub mod sources;
pub mod utils;

// Re-exports for public API
pub use config::{GatherConfig, GatherConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{ProbeExecutor, SystemProbeExecutor, ToolOutput};
pub use gather::{Gatherer, MetadataReport, SourceFailure, SourceOutcome, gather, write_report};
pub use processing::{CommonVariables, MediaTypeGuess, VideoSystem, classify};
pub use sources::ProbeSource;
