//! Broadcast video system classification from picture size and frame rate.

use serde::Serialize;
use std::fmt;

/// Frame rates accepted as broadcast rates.
///
/// Membership is an exact comparison: 29.97 matches, 29.9700001 does not.
pub const STANDARD_VIDEO_FRAME_RATES: [f64; 10] =
    [23.97, 23.976, 24.0, 24.97, 24.975, 25.0, 29.97, 30.0, 50.0, 60.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VideoSystem {
    #[serde(rename = "NTSC")]
    Ntsc,
    #[serde(rename = "PAL")]
    Pal,
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "unknown")]
    Unknown,
}

impl VideoSystem {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VideoSystem::Ntsc => "NTSC",
            VideoSystem::Pal => "PAL",
            VideoSystem::Hd => "HD",
            VideoSystem::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VideoSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DisplayAspect {
    FourThree,
    SixteenNine,
}

#[allow(clippy::float_cmp)]
fn is_standard_frame_rate(frame_rate: f64) -> bool {
    STANDARD_VIDEO_FRAME_RATES.iter().any(|&rate| rate == frame_rate)
}

/// Classifies a picture as NTSC, PAL or HD.
///
/// Standard definition sizes include the clean aperture variants (486 lines
/// for NTSC, 385/769/513/1026 wide for PAL). HD covers 720 and 1080 line
/// production and clean aperture sizes.
#[must_use]
pub fn classify(height: i64, width: i64, frame_rate: f64) -> VideoSystem {
    let standard_rate = is_standard_frame_rate(frame_rate);

    match height {
        480 | 486 => {
            let aspect = match width {
                320 | 640 => Some(DisplayAspect::FourThree),
                427 | 853 => Some(DisplayAspect::SixteenNine),
                _ => None,
            };
            if aspect.is_some() && standard_rate {
                return VideoSystem::Ntsc;
            }
        }
        576 => {
            let aspect = match width {
                384 | 385 | 768 | 769 => Some(DisplayAspect::FourThree),
                512 | 513 | 1024 | 1026 => Some(DisplayAspect::SixteenNine),
                _ => None,
            };
            if aspect.is_some() && standard_rate {
                return VideoSystem::Pal;
            }
        }
        702 | 720 | 1062 => {
            let hd_width = match height {
                702 => 1248,
                720 => 1280,
                _ => 1888,
            };
            if width == hd_width && standard_rate {
                return VideoSystem::Hd;
            }
        }
        1080 => {
            if width == 1920 && standard_rate {
                return VideoSystem::Hd;
            }
        }
        _ => {}
    }

    VideoSystem::Unknown
}

/// Like [`classify`], but any missing input gives [`VideoSystem::Unknown`].
#[must_use]
pub fn determine_video_system(
    height: Option<i64>,
    width: Option<i64>,
    frame_rate: Option<f64>,
) -> VideoSystem {
    match (height, width, frame_rate) {
        (Some(h), Some(w), Some(rate)) => classify(h, w, rate),
        _ => {
            log::trace!(
                "Video system undetermined: height={:?} width={:?} frame_rate={:?}",
                height,
                width,
                frame_rate
            );
            VideoSystem::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_common_formats() {
        assert_eq!(classify(1080, 1920, 29.97), VideoSystem::Hd);
        assert_eq!(classify(480, 640, 29.97), VideoSystem::Ntsc);
        assert_eq!(classify(576, 768, 25.0), VideoSystem::Pal);
        assert_eq!(classify(720, 1280, 50.0), VideoSystem::Hd);
    }

    #[test]
    fn test_clean_aperture_sizes() {
        assert_eq!(classify(486, 853, 29.97), VideoSystem::Ntsc);
        assert_eq!(classify(576, 1026, 25.0), VideoSystem::Pal);
        assert_eq!(classify(702, 1248, 25.0), VideoSystem::Hd);
        assert_eq!(classify(1062, 1888, 23.976), VideoSystem::Hd);
    }

    #[test]
    fn test_non_standard_frame_rate_is_unknown() {
        assert_eq!(classify(1080, 1920, 29.0), VideoSystem::Unknown);
        assert_eq!(classify(576, 768, 12.5), VideoSystem::Unknown);
    }

    #[test]
    fn test_frame_rate_match_is_exact() {
        // An unrounded 30000/1001 is not in the table.
        assert_eq!(classify(480, 640, 30000.0 / 1001.0), VideoSystem::Unknown);
        assert_eq!(classify(480, 640, 29.97), VideoSystem::Ntsc);
    }

    #[test]
    fn test_unlisted_sizes_are_unknown() {
        assert_eq!(classify(480, 720, 29.97), VideoSystem::Unknown);
        assert_eq!(classify(1080, 1440, 25.0), VideoSystem::Unknown);
        assert_eq!(classify(2160, 3840, 25.0), VideoSystem::Unknown);
        assert_eq!(classify(720, 1888, 25.0), VideoSystem::Unknown);
    }

    #[test]
    fn test_missing_inputs() {
        assert_eq!(
            determine_video_system(Some(1080), Some(1920), Some(25.0)),
            VideoSystem::Hd
        );
        assert_eq!(
            determine_video_system(None, Some(1920), Some(25.0)),
            VideoSystem::Unknown
        );
        assert_eq!(
            determine_video_system(Some(1080), Some(1920), None),
            VideoSystem::Unknown
        );
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(serde_json::to_value(VideoSystem::Ntsc).unwrap(), "NTSC");
        assert_eq!(serde_json::to_value(VideoSystem::Unknown).unwrap(), "unknown");
        assert_eq!(VideoSystem::Hd.to_string(), "HD");
    }
}
