//! The fixed set of metadata sources a run can consult.

use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// One external probing source.
///
/// The key returned by [`ProbeSource::key`] is the name the source's record
/// is stored under in the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProbeSource {
    Exiftool,
    FileMagic,
    Ffprobe,
    Mediainfo,
}

impl ProbeSource {
    /// All sources, in report key order.
    pub const ALL: [ProbeSource; 4] = [
        ProbeSource::Exiftool,
        ProbeSource::FileMagic,
        ProbeSource::Ffprobe,
        ProbeSource::Mediainfo,
    ];

    /// Order in which sources are run for a file.
    pub const RUN_ORDER: [ProbeSource; 4] = [
        ProbeSource::FileMagic,
        ProbeSource::Mediainfo,
        ProbeSource::Ffprobe,
        ProbeSource::Exiftool,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ProbeSource::Exiftool => "exiftool",
            ProbeSource::FileMagic => "filemagic",
            ProbeSource::Ffprobe => "ffprobe",
            ProbeSource::Mediainfo => "mediainfo",
        }
    }

    /// Human readable name used in log lines.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ProbeSource::Exiftool => "ExifTool",
            ProbeSource::FileMagic => "FileMagic",
            ProbeSource::Ffprobe => "FFProbe",
            ProbeSource::Mediainfo => "MediaInfo",
        }
    }
}

impl fmt::Display for ProbeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProbeSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exiftool" | "exif" => Ok(ProbeSource::Exiftool),
            "filemagic" | "magic" => Ok(ProbeSource::FileMagic),
            "ffprobe" => Ok(ProbeSource::Ffprobe),
            "mediainfo" => Ok(ProbeSource::Mediainfo),
            other => Err(CoreError::Config(format!(
                "Unknown module '{}' (expected one of: exiftool, filemagic, ffprobe, mediainfo)",
                other
            ))),
        }
    }
}
