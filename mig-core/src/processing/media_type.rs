//! Media type (`type/subtype; charset=...`) guesses and their resolution.

use serde::Serialize;

use super::exiftool::ExiftoolRecord;

/// A MIME style guess for a file.
///
/// An empty guess (no type) serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaTypeGuess {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

impl MediaTypeGuess {
    /// Splits `type/subtype`. A value without a slash only sets the type.
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Self {
        let mime = mime.trim();
        let (media_type, subtype) = match mime.split_once('/') {
            Some((t, s)) => (t.trim(), Some(s.trim())),
            None => (mime, None),
        };
        Self {
            media_type: (!media_type.is_empty()).then(|| media_type.to_string()),
            subtype: subtype.filter(|s| !s.is_empty()).map(str::to_string),
            charset: None,
        }
    }

    /// Parses `file --brief --mime` output, e.g. `text/plain; charset=us-ascii`.
    #[must_use]
    pub fn from_mime_description(description: &str) -> Self {
        let mut parts = description.trim().split(';');
        let mut guess = Self::from_mime_type(parts.next().unwrap_or_default());

        for param in parts {
            if let Some((key, value)) = param.split_once('=') {
                if key.trim().eq_ignore_ascii_case("charset") {
                    guess.charset = Some(value.trim().to_string());
                }
            }
        }
        guess
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.media_type.is_none()
    }

    /// `type/subtype`, or just the type when there is no subtype.
    #[must_use]
    pub fn essence(&self) -> Option<String> {
        let media_type = self.media_type.as_deref()?;
        Some(match &self.subtype {
            Some(subtype) => format!("{}/{}", media_type, subtype),
            None => media_type.to_string(),
        })
    }
}

/// Picks the media type for a report.
///
/// The sniffer's guess is used when it found a type; otherwise exiftool's
/// `MIMEType` tag is split on `/`. With neither there is no media type.
#[must_use]
pub fn resolve_media_type(
    sniffed: Option<&MediaTypeGuess>,
    exiftool: Option<&ExiftoolRecord>,
) -> Option<MediaTypeGuess> {
    if let Some(guess) = sniffed.filter(|g| !g.is_empty()) {
        log::debug!("Media type from content sniffing: {:?}", guess.essence());
        return Some(guess.clone());
    }

    let guess = exiftool
        .and_then(ExiftoolRecord::mime_type)
        .map(MediaTypeGuess::from_mime_type)
        .filter(|g| !g.is_empty());
    if let Some(guess) = &guess {
        log::debug!("Media type from exiftool MIMEType: {:?}", guess.essence());
    }
    guess
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::exiftool::parse_exiftool_output;

    fn exiftool(json: &str) -> ExiftoolRecord {
        parse_exiftool_output(json.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_mime_description_with_charset() {
        let guess = MediaTypeGuess::from_mime_description("text/plain; charset=us-ascii\n");
        assert_eq!(guess.media_type.as_deref(), Some("text"));
        assert_eq!(guess.subtype.as_deref(), Some("plain"));
        assert_eq!(guess.charset.as_deref(), Some("us-ascii"));
    }

    #[test]
    fn test_mime_description_without_charset() {
        let guess = MediaTypeGuess::from_mime_description("video/mp4");
        assert_eq!(guess.essence().as_deref(), Some("video/mp4"));
        assert_eq!(guess.charset, None);
    }

    #[test]
    fn test_empty_description_is_empty_guess() {
        let guess = MediaTypeGuess::from_mime_description("");
        assert!(guess.is_empty());
        assert_eq!(serde_json::to_value(&guess).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_sniffer_takes_precedence() {
        let sniffed = MediaTypeGuess::from_mime_description("video/quicktime; charset=binary");
        let exif = exiftool(r#"[{"MIMEType":"video/mp4"}]"#);

        let resolved = resolve_media_type(Some(&sniffed), Some(&exif)).unwrap();
        assert_eq!(resolved, sniffed);
    }

    #[test]
    fn test_exiftool_used_when_sniffer_found_nothing() {
        let exif = exiftool(r#"[{"File":{"MIMEType":"audio/x-wav"}}]"#);

        let resolved = resolve_media_type(Some(&MediaTypeGuess::default()), Some(&exif)).unwrap();
        assert_eq!(resolved.media_type.as_deref(), Some("audio"));
        assert_eq!(resolved.subtype.as_deref(), Some("x-wav"));

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json, serde_json::json!({"type": "audio", "subtype": "x-wav"}));
    }

    #[test]
    fn test_no_sources_no_media_type() {
        assert_eq!(resolve_media_type(None, None), None);
        let exif = exiftool(r#"[{"File":{"FileSize":"1 kB"}}]"#);
        assert_eq!(resolve_media_type(None, Some(&exif)), None);
    }
}
