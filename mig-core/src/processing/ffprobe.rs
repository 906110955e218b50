//! Parser for ffprobe's JSON report.
//!
//! ffprobe is run with `-print_format json -show_format -show_streams`. The
//! first video stream and the first audio stream provide the stream
//! attributes; the `format` object provides container level values. Derived
//! values (aspect quotient, widescreen and HD flags, channel count, frames per
//! second) are computed on first use and cached on the record.

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::utils::{parse_rational, round_to};

/// Aspect quotient above which a picture counts as widescreen.
pub const WIDESCREEN_QUOTIENT_THRESHOLD: f64 = 1.4;

/// Widest picture that still counts as standard definition.
pub const MAX_STANDARD_DEFINITION_WIDTH: i64 = 720;

static CHANNEL_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(?:\.(\d+))?").expect("channel count pattern is valid"));

// ============================================================================
// RAW DOCUMENT
// ============================================================================

/// The subset of ffprobe's JSON document that mig reads.
///
/// Every field is read leniently: a value of an unexpected type (a width
/// given as a string, `"tags": null`) is read as absent or converted, so a
/// well-formed document never fails to parse.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProbeDocument {
    #[serde(default, deserialize_with = "lenient_object")]
    pub format: Option<ProbeFormat>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProbeFormat {
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bit_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub tags: Map<String, Value>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProbeStream {
    #[serde(default, deserialize_with = "lenient_string")]
    pub codec_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub codec_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color_space: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub height: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_aspect_ratio: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sample_aspect_ratio: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bit_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub avg_frame_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sample_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub channels: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub channel_layout: Option<String>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub tags: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub side_data_list: Vec<Map<String, Value>>,
}

impl ProbeDocument {
    fn first_stream(&self, codec_type: &str) -> Option<&ProbeStream> {
        self.streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some(codec_type))
    }
}

/// Parses ffprobe's JSON output.
///
/// Only output that is not JSON is an error. A JSON value that is not an
/// object yields an empty document.
pub fn parse_probe_json(output: &str) -> CoreResult<ProbeDocument> {
    let value: Value = serde_json::from_str(output)
        .map_err(|e| CoreError::JsonParseError(format!("ffprobe output: {}", e)))?;
    if !value.is_object() {
        log::debug!("ffprobe output is not a JSON object; no streams read");
        return Ok(ProbeDocument::default());
    }
    ProbeDocument::deserialize(value)
        .map_err(|e| CoreError::JsonParseError(format!("ffprobe output: {}", e)))
}

// ---- Lenient field readers ----

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => T::deserialize(value).ok(),
        _ => None,
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn tag_str(tags: &Map<String, Value>, key: &str) -> Option<String> {
    match tags.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_num<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse::<T>().ok())
}

// ============================================================================
// STREAM ATTRIBUTES
// ============================================================================

/// Values read directly from the probe document.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct StreamAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timecode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorspace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_bitrate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_channels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_bitrate: Option<u64>,
}

impl StreamAttributes {
    /// Collects attributes from a parsed document. Missing objects are fine.
    #[must_use]
    pub fn from_document(doc: &ProbeDocument) -> Self {
        let mut attrs = StreamAttributes::default();
        let video = doc.first_stream("video");
        let audio = doc.first_stream("audio");

        if let Some(format) = &doc.format {
            attrs.duration = parse_num(format.duration.as_deref());
            attrs.start_time = parse_num(format.start_time.as_deref());
            attrs.bitrate = parse_num(format.bit_rate.as_deref());
            attrs.creation_time = tag_str(&format.tags, "creation_time");
        }

        if let Some(stream) = video {
            attrs.video_codec = stream.codec_name.clone();
            attrs.colorspace = stream.color_space.clone();
            attrs.width = stream.width;
            attrs.height = stream.height;
            attrs.resolution = match (stream.width, stream.height) {
                (Some(w), Some(h)) => Some(format!("{}x{}", w, h)),
                _ => None,
            };
            attrs.dar = stream.display_aspect_ratio.clone();
            attrs.sar = stream.sample_aspect_ratio.clone();
            attrs.video_bitrate = parse_num(stream.bit_rate.as_deref());
            attrs.frame_rate = stream.avg_frame_rate.clone();
            attrs.rotation = rotation_of(stream);
        }

        attrs.timecode = video
            .and_then(|s| tag_str(&s.tags, "timecode"))
            .or_else(|| {
                doc.format
                    .as_ref()
                    .and_then(|f| tag_str(&f.tags, "timecode"))
            });

        if let Some(stream) = audio {
            attrs.audio_codec = stream.codec_name.clone();
            attrs.audio_sample_rate = parse_num(stream.sample_rate.as_deref());
            attrs.audio_channels = stream
                .channel_layout
                .clone()
                .or_else(|| stream.channels.map(|c| c.to_string()));
            attrs.audio_bitrate = parse_num(stream.bit_rate.as_deref());
        }

        attrs
    }
}

fn rotation_of(stream: &ProbeStream) -> Option<i64> {
    if let Some(rotate) = tag_str(&stream.tags, "rotate") {
        if let Ok(value) = rotate.trim().parse::<i64>() {
            return Some(value);
        }
    }
    stream
        .side_data_list
        .iter()
        .find_map(|side_data| side_data.get("rotation"))
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
}

// ============================================================================
// DERIVED VALUES
// ============================================================================

/// Number of audio channels described by a channel layout or count.
///
/// Named layouts are checked first (`mono`, `stereo`, `5.1`, `7.2`). Any
/// other descriptor uses its first `<int>[.<int>]` group, summing both parts,
/// so `"6.1"` is 7 and `"7ch"` is 7. Anything else counts as 0.
#[must_use]
pub fn audio_channel_count(descriptor: Option<&str>) -> u32 {
    let Some(descriptor) = descriptor.filter(|d| !d.is_empty()) else {
        return 0;
    };

    if descriptor.contains("mono") {
        return 1;
    }
    if descriptor.contains("stereo") {
        return 2;
    }
    if descriptor.contains("5.1") {
        return 6;
    }
    if descriptor.contains("7.2") {
        return 9;
    }

    CHANNEL_COUNT_RE
        .captures(descriptor)
        .map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .filter_map(|m| m.as_str().parse::<u32>().ok())
                .fold(0u32, u32::saturating_add)
        })
        .unwrap_or(0)
}

/// Quotient of a `W:H` display aspect ratio.
#[must_use]
pub fn aspect_quotient_from_ratio(ratio: &str) -> Option<f64> {
    let (w, h) = ratio.split_once(':')?;
    let w = w.trim().parse::<f64>().ok()?;
    let h = h.trim().parse::<f64>().ok()?;
    if h == 0.0 {
        return None;
    }
    let quotient = w / h;
    (quotient.is_finite() && quotient != 0.0).then_some(quotient)
}

// ============================================================================
// RECORD
// ============================================================================

/// ffprobe's contribution to a report.
///
/// An invalid record (ffprobe printed something that is not JSON) keeps its
/// path, command and raw output but has no attributes and no derived values.
#[derive(Debug, Clone)]
pub struct FfprobeRecord {
    path: PathBuf,
    command: String,
    output: String,
    invalid: bool,
    attributes: StreamAttributes,

    dar_quotient: OnceCell<Option<f64>>,
    dimensions_quotient: OnceCell<Option<f64>>,
    channel_count: OnceCell<u32>,
    frames_per_second: OnceCell<Option<f64>>,
}

impl FfprobeRecord {
    /// Builds a record from ffprobe's raw JSON output.
    #[must_use]
    pub fn from_output(path: impl Into<PathBuf>, command: impl Into<String>, output: String) -> Self {
        let path = path.into();
        let (invalid, attributes) = match parse_probe_json(&output) {
            Ok(doc) => (false, StreamAttributes::from_document(&doc)),
            Err(e) => {
                log::error!(
                    "Failed to parse ffprobe output for {}: {}",
                    path.display(),
                    e
                );
                (true, StreamAttributes::default())
            }
        };

        Self {
            path,
            command: command.into(),
            output,
            invalid,
            attributes,
            dar_quotient: OnceCell::new(),
            dimensions_quotient: OnceCell::new(),
            channel_count: OnceCell::new(),
            frames_per_second: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.invalid
    }

    #[must_use]
    pub fn attributes(&self) -> &StreamAttributes {
        &self.attributes
    }

    /// Quotient of the display aspect ratio, when ffprobe reported one.
    pub fn aspect_from_display_aspect_ratio(&self) -> Option<f64> {
        *self.dar_quotient.get_or_init(|| {
            self.attributes
                .dar
                .as_deref()
                .and_then(aspect_quotient_from_ratio)
        })
    }

    /// Width divided by height.
    pub fn aspect_from_dimensions(&self) -> Option<f64> {
        *self.dimensions_quotient.get_or_init(|| {
            let (w, h) = (self.attributes.width?, self.attributes.height?);
            if h == 0 {
                return None;
            }
            let quotient = w as f64 / h as f64;
            (!quotient.is_nan()).then_some(quotient)
        })
    }

    /// Display aspect ratio quotient, falling back to the dimensions.
    pub fn calculated_aspect_quotient(&self) -> Option<f64> {
        self.aspect_from_display_aspect_ratio()
            .or_else(|| self.aspect_from_dimensions())
    }

    /// None when the aspect cannot be worked out.
    pub fn is_widescreen(&self) -> Option<bool> {
        self.calculated_aspect_quotient()
            .map(|q| q > WIDESCREEN_QUOTIENT_THRESHOLD)
    }

    pub fn is_high_definition(&self) -> Option<bool> {
        if self.invalid {
            return None;
        }
        Some(self.attributes.width.unwrap_or(0) > MAX_STANDARD_DEFINITION_WIDTH)
    }

    pub fn audio_channel_count(&self) -> Option<u32> {
        if self.invalid {
            return None;
        }
        Some(
            *self
                .channel_count
                .get_or_init(|| audio_channel_count(self.attributes.audio_channels.as_deref())),
        )
    }

    /// Average frame rate, rounded to three decimals (`30000/1001` is 29.97).
    pub fn frames_per_second(&self) -> Option<f64> {
        *self.frames_per_second.get_or_init(|| {
            self.attributes
                .frame_rate
                .as_deref()
                .and_then(parse_rational)
                .map(|rate| round_to(rate, 3))
        })
    }
}

impl Serialize for FfprobeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Flat<'a> {
            path: &'a Path,
            command: &'a str,
            output: &'a str,
            #[serde(skip_serializing_if = "std::ops::Not::not")]
            invalid: bool,
            #[serde(flatten)]
            attributes: &'a StreamAttributes,
            #[serde(skip_serializing_if = "Option::is_none")]
            audio_channel_count: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            calculated_aspect_quotient: Option<Option<f64>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_widescreen: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_high_definition: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            frames_per_second: Option<f64>,
        }

        Flat {
            path: &self.path,
            command: &self.command,
            output: &self.output,
            invalid: self.invalid,
            attributes: &self.attributes,
            audio_channel_count: self.audio_channel_count(),
            calculated_aspect_quotient: (!self.invalid)
                .then(|| self.calculated_aspect_quotient()),
            is_widescreen: self.is_widescreen(),
            is_high_definition: self.is_high_definition(),
            frames_per_second: self.frames_per_second(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD_CLIP: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "display_aspect_ratio": "16:9",
                "sample_aspect_ratio": "1:1",
                "color_space": "bt709",
                "avg_frame_rate": "30000/1001",
                "bit_rate": "8000000",
                "tags": { "timecode": "01:00:00;00" }
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "sample_rate": "48000",
                "channels": 6,
                "channel_layout": "5.1(side)",
                "bit_rate": "320000"
            },
            {
                "index": 2,
                "codec_name": "mp3",
                "codec_type": "audio",
                "sample_rate": "44100",
                "channel_layout": "stereo"
            }
        ],
        "format": {
            "filename": "/media/hd.mp4",
            "duration": "12.512000",
            "start_time": "0.000000",
            "bit_rate": "8421000",
            "tags": { "creation_time": "2021-03-04T10:11:12.000000Z" }
        }
    }"#;

    fn record(json: &str) -> FfprobeRecord {
        FfprobeRecord::from_output("/media/hd.mp4", "ffprobe /media/hd.mp4", json.to_string())
    }

    #[test]
    fn test_channel_count_named_layouts() {
        assert_eq!(audio_channel_count(Some("5.1")), 6);
        assert_eq!(audio_channel_count(Some("mono")), 1);
        assert_eq!(audio_channel_count(Some("stereo")), 2);
        assert_eq!(audio_channel_count(Some("7.2")), 9);
        assert_eq!(audio_channel_count(Some("5.1(side)")), 6);
    }

    #[test]
    fn test_channel_count_numeric_descriptors() {
        assert_eq!(audio_channel_count(Some("7ch")), 7);
        assert_eq!(audio_channel_count(Some("6.1")), 7);
        assert_eq!(audio_channel_count(Some("2")), 2);
    }

    #[test]
    fn test_channel_count_missing_or_unparsable() {
        assert_eq!(audio_channel_count(None), 0);
        assert_eq!(audio_channel_count(Some("")), 0);
        assert_eq!(audio_channel_count(Some("quad")), 0);
    }

    #[test]
    fn test_aspect_quotient_from_ratio() {
        let q = aspect_quotient_from_ratio("16:9").unwrap();
        assert!((q - 1.7778).abs() < 1e-4);
        assert_eq!(aspect_quotient_from_ratio("4:0"), None);
        assert_eq!(aspect_quotient_from_ratio("0:1"), None);
        assert_eq!(aspect_quotient_from_ratio("N/A"), None);
    }

    #[test]
    fn test_first_video_and_audio_streams_win() {
        let rec = record(HD_CLIP);
        let attrs = rec.attributes();

        assert!(rec.is_valid());
        assert_eq!(attrs.video_codec.as_deref(), Some("h264"));
        assert_eq!(attrs.resolution.as_deref(), Some("1920x1080"));
        assert_eq!(attrs.audio_codec.as_deref(), Some("aac"));
        assert_eq!(attrs.audio_sample_rate, Some(48000));
        assert_eq!(attrs.audio_channels.as_deref(), Some("5.1(side)"));
        assert_eq!(attrs.duration, Some(12.512));
        assert_eq!(attrs.bitrate, Some(8_421_000));
        assert_eq!(attrs.timecode.as_deref(), Some("01:00:00;00"));
        assert_eq!(
            attrs.creation_time.as_deref(),
            Some("2021-03-04T10:11:12.000000Z")
        );
        assert_eq!(rec.audio_channel_count(), Some(6));
        assert_eq!(rec.is_high_definition(), Some(true));
        assert_eq!(rec.frames_per_second(), Some(29.97));
    }

    #[test]
    fn test_dimensions_give_widescreen_quotient_without_dar() {
        let rec = record(
            r#"{"streams":[{"codec_type":"video","width":1920,"height":1080}],"format":{}}"#,
        );
        let first = rec.calculated_aspect_quotient().unwrap();
        let second = rec.calculated_aspect_quotient().unwrap();

        assert!((first - 1.7778).abs() < 1e-4);
        assert_eq!(first, second);
        assert_eq!(rec.is_widescreen(), Some(true));
    }

    #[test]
    fn test_dar_takes_precedence_over_dimensions() {
        let rec = record(
            r#"{"streams":[{"codec_type":"video","width":720,"height":480,"display_aspect_ratio":"4:3"}]}"#,
        );
        let q = rec.calculated_aspect_quotient().unwrap();
        assert!((q - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(rec.is_widescreen(), Some(false));
        assert_eq!(rec.is_high_definition(), Some(false));
    }

    #[test]
    fn test_zero_height_has_no_quotient() {
        let rec = record(r#"{"streams":[{"codec_type":"video","width":640,"height":0}]}"#);
        assert_eq!(rec.calculated_aspect_quotient(), None);
        assert_eq!(rec.is_widescreen(), None);
    }

    #[test]
    fn test_audio_only_document() {
        let rec = record(
            r#"{"streams":[{"codec_type":"audio","channels":2}],"format":{"duration":"3.0"}}"#,
        );
        assert!(rec.is_valid());
        assert_eq!(rec.attributes().audio_channels.as_deref(), Some("2"));
        assert_eq!(rec.audio_channel_count(), Some(2));
        assert_eq!(rec.attributes().width, None);
        assert_eq!(rec.is_high_definition(), Some(false));
        assert_eq!(rec.calculated_aspect_quotient(), None);
    }

    #[test]
    fn test_rotation_from_tags_or_side_data() {
        let tagged = record(
            r#"{"streams":[{"codec_type":"video","tags":{"rotate":"90"}}]}"#,
        );
        assert_eq!(tagged.attributes().rotation, Some(90));

        let side_data = record(
            r#"{"streams":[{"codec_type":"video","side_data_list":[{"side_data_type":"Display Matrix","rotation":-90}]}]}"#,
        );
        assert_eq!(side_data.attributes().rotation, Some(-90));
    }

    #[test]
    fn test_timecode_falls_back_to_format_tags() {
        let rec = record(
            r#"{"streams":[{"codec_type":"video"}],"format":{"tags":{"timecode":"10:00:00:00"}}}"#,
        );
        assert_eq!(rec.attributes().timecode.as_deref(), Some("10:00:00:00"));
    }

    #[test]
    fn test_undefined_frame_rate() {
        let rec = record(r#"{"streams":[{"codec_type":"video","avg_frame_rate":"0/0"}]}"#);
        assert_eq!(rec.frames_per_second(), None);
    }

    #[test]
    fn test_invalid_json_marks_record_invalid() {
        let rec = record("this is not json");
        assert!(!rec.is_valid());
        assert_eq!(rec.attributes(), &StreamAttributes::default());
        assert_eq!(rec.audio_channel_count(), None);
        assert_eq!(rec.is_high_definition(), None);
        assert_eq!(rec.calculated_aspect_quotient(), None);

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["invalid"], true);
        assert_eq!(json["output"], "this is not json");
        assert!(json.get("audio_channel_count").is_none());
        assert!(json.get("calculated_aspect_quotient").is_none());
    }

    #[test]
    fn test_unexpected_value_types_keep_the_record_valid() {
        let rec = record(
            r#"{
                "streams": [
                    {"codec_type":"video","codec_name":"h264","width":"1920","height":1080,
                     "tags":null,"side_data_list":null},
                    {"codec_type":"audio","channel_layout":"stereo","channels":"two"}
                ],
                "format": {"duration":"10.0","tags":null}
            }"#,
        );
        let attrs = rec.attributes();

        assert!(rec.is_valid());
        assert_eq!(attrs.video_codec.as_deref(), Some("h264"));
        assert_eq!(attrs.width, Some(1920));
        assert_eq!(attrs.resolution.as_deref(), Some("1920x1080"));
        assert_eq!(attrs.duration, Some(10.0));
        assert_eq!(attrs.timecode, None);
        assert_eq!(rec.audio_channel_count(), Some(2));
        assert_eq!(rec.is_high_definition(), Some(true));
    }

    #[test]
    fn test_non_numeric_width_only_loses_the_dimensions() {
        let rec = record(
            r#"{"streams":[{"codec_type":"video","width":"wide","height":1080,"avg_frame_rate":"25/1"}]}"#,
        );

        assert!(rec.is_valid());
        assert_eq!(rec.attributes().width, None);
        assert_eq!(rec.aspect_from_dimensions(), None);
        assert_eq!(rec.is_high_definition(), Some(false));
        assert_eq!(rec.frames_per_second(), Some(25.0));
    }

    #[test]
    fn test_json_without_streams_is_an_empty_valid_record() {
        for output in [r#"{"streams":null,"format":"none"}"#, "[]", "null"] {
            let rec = record(output);
            assert!(rec.is_valid(), "{}", output);
            assert_eq!(rec.attributes(), &StreamAttributes::default());
        }
    }

    #[test]
    fn test_unresolved_quotient_serializes_as_null() {
        let json = serde_json::to_value(record(r#"{"streams":[]}"#)).unwrap();
        assert_eq!(json["calculated_aspect_quotient"], serde_json::Value::Null);
        assert!(json.as_object().unwrap().contains_key("calculated_aspect_quotient"));
        assert_eq!(json["audio_channel_count"], 0);
    }

    #[test]
    fn test_channel_count_saturates_on_absurd_descriptors() {
        assert_eq!(audio_channel_count(Some("4294967295.3")), u32::MAX);
    }

    #[test]
    fn test_serialized_record_includes_derived_values() {
        let json = serde_json::to_value(record(HD_CLIP)).unwrap();

        assert_eq!(json["path"], "/media/hd.mp4");
        assert_eq!(json["width"], 1920);
        assert_eq!(json["audio_channel_count"], 6);
        assert_eq!(json["is_widescreen"], true);
        assert_eq!(json["frames_per_second"], 29.97);
        assert!(json.get("invalid").is_none());
        assert!(json.get("rotation").is_none());
    }
}
