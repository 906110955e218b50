//! Parsing and normalization of probe tool output.
//!
//! Each probe tool gets a parser that turns its raw output into a record.
//! The classifier and the reconciler then combine those records into the
//! common variables and media type of a report.

/// mediainfo text report parser
pub mod mediainfo;

/// ffprobe JSON parser and derived stream values
pub mod ffprobe;

/// exiftool JSON output
pub mod exiftool;

/// NTSC / PAL / HD classification
pub mod video_system;

/// Media type guesses and their resolution
pub mod media_type;

/// Reconciliation into common variables
pub mod common;

pub use common::{CommonVariables, MediaCategory, MetadataSources, common_variables};
pub use exiftool::{ExiftoolRecord, parse_exiftool_output};
pub use ffprobe::{FfprobeRecord, StreamAttributes, audio_channel_count, parse_probe_json};
pub use media_type::{MediaTypeGuess, resolve_media_type};
pub use mediainfo::{MediainfoRecord, SectionData, SectionEntry, parse_mediainfo_bytes};
pub use video_system::{VideoSystem, classify, determine_video_system};
