//! Reconciliation of the per-source records into one set of common variables.
//!
//! ffprobe supplies the picture, timing and audio figures; mediainfo supplies
//! the codec naming, bit depth, chroma and scan details plus the audio track
//! count. Either source may be missing, failed or partially populated: every
//! lookup tolerates that and simply leaves the field unset.

use serde::Serialize;
use std::path::Path;

use super::ffprobe::FfprobeRecord;
use super::mediainfo::{MediainfoRecord, SectionData};
use super::video_system::{VideoSystem, determine_video_system};

/// Broad kind of media a set of common variables describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaCategory {
    #[default]
    Video,
    Audio,
    Image,
}

/// Source records available to the reconciler.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataSources<'a> {
    pub ffprobe: Option<&'a FfprobeRecord>,
    pub mediainfo: Option<&'a MediainfoRecord>,
}

/// The normalized view of a file. Fields that could not be derived are
/// left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_aspect_quotient: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chroma_subsampling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_commercial_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames_per_second: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_high_definition: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_audio_tracks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_audio_channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timecode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_system: Option<VideoSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

/// Builds the common variables for a category.
///
/// Only video is reconciled; audio and image return an empty record.
#[must_use]
pub fn common_variables(sources: MetadataSources<'_>, category: MediaCategory) -> CommonVariables {
    match category {
        MediaCategory::Video => common_video_variables(sources),
        MediaCategory::Audio | MediaCategory::Image => {
            log::debug!("No common variables are derived for {:?} media", category);
            CommonVariables::default()
        }
    }
}

fn owned(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

fn video_section(mediainfo: &MediainfoRecord) -> Option<&SectionData> {
    mediainfo
        .section("Video")
        .or_else(|| mediainfo.first_section_of_type("video"))
}

fn general_section(mediainfo: &MediainfoRecord) -> Option<&SectionData> {
    mediainfo
        .section("General")
        .or_else(|| mediainfo.first_section_of_type("general"))
}

/// Builds the video common variables.
#[must_use]
pub fn common_video_variables(sources: MetadataSources<'_>) -> CommonVariables {
    let mut cv = CommonVariables::default();

    let ffprobe = sources.ffprobe.filter(|record| {
        if !record.is_valid() {
            log::debug!("Ignoring invalid ffprobe record for common variables");
        }
        record.is_valid()
    });

    if let Some(record) = ffprobe {
        let attrs = record.attributes();
        let frames_per_second = record.frames_per_second();

        cv.file_path = Some(record.path().to_string_lossy().into_owned());
        cv.aspect_ratio = record
            .is_widescreen()
            .map(|wide| if wide { "16:9" } else { "4:3" }.to_string());
        cv.audio_sample_rate = attrs.audio_sample_rate;
        cv.calculated_aspect_quotient = record.calculated_aspect_quotient();
        cv.duration = attrs.duration;
        cv.frames_per_second = frames_per_second;
        cv.height = attrs.height;
        cv.width = attrs.width;
        cv.is_high_definition = record.is_high_definition();
        cv.number_of_audio_channels = record.audio_channel_count();
        cv.resolution = attrs.resolution.clone();
        cv.timecode = attrs.timecode.clone();
        cv.video_system = Some(determine_video_system(
            attrs.height,
            attrs.width,
            frames_per_second,
        ));
    }

    if let Some(mediainfo) = sources.mediainfo {
        let video = video_section(mediainfo);
        let general = general_section(mediainfo);
        let video_field = |key: &str| owned(video.and_then(|s| s.get(key)));
        let general_field = |key: &str| owned(general.and_then(|s| s.get(key)));

        cv.bit_depth = video_field("Bit depth");
        cv.chroma_subsampling = video_field("Chroma subsampling");
        cv.scan_type = video_field("Scan type");
        cv.scan_order = video_field("Scan order");
        cv.codec_id = video_field("Codec ID").or_else(|| general_field("Codec ID"));
        cv.codec_commercial_name =
            general_field("Commercial name").or_else(|| video_field("Commercial name"));
        cv.number_of_audio_tracks = mediainfo.section_type_count("audio");

        if cv.file_path.is_none() {
            cv.file_path = general_field("Complete name");
        }
    }

    cv.source_directory = cv.file_path.as_deref().map(parent_directory);

    cv
}

/// Directory part of `path`. A bare file name lives in `.`.
fn parent_directory(path: &str) -> String {
    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
        Some(_) => ".".to_string(),
        None if path.starts_with('/') => "/".to_string(),
        None => ".".to_string(),
    }
}
