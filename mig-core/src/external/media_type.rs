//! MIME type sniffing for the `filemagic` source.
//!
//! Known binary formats are recognised from their magic numbers with the
//! `infer` crate. Anything it does not know (text, many professional
//! containers) is handed to `file --brief --mime`, which also reports a
//! charset. Every failure along the way produces an empty guess.

use std::ffi::OsStr;
use std::path::Path;

use super::run_tool;
use crate::processing::media_type::MediaTypeGuess;
use crate::utils::decode_text;

/// Guesses the media type of `path`.
pub fn sniff_media_type(file_cmd: &Path, path: &Path) -> MediaTypeGuess {
    match infer::get_from_path(path) {
        Ok(Some(kind)) => {
            log::debug!("Content sniffing matched {}", kind.mime_type());
            return MediaTypeGuess::from_mime_type(kind.mime_type());
        }
        Ok(None) => log::debug!(
            "Content sniffing did not recognise {}, asking {}",
            path.display(),
            file_cmd.display()
        ),
        Err(e) => log::debug!("Content sniffing could not read {}: {}", path.display(), e),
    }

    match run_tool(
        file_cmd,
        &[OsStr::new("--brief"), OsStr::new("--mime"), path.as_os_str()],
    ) {
        Ok(output) => MediaTypeGuess::from_mime_description(&decode_text(output.stdout)),
        Err(e) => {
            log::debug!("MIME lookup failed for {}: {}", path.display(), e);
            MediaTypeGuess::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MISSING_FILE_CMD: &str = "/nonexistent/bin/file";

    #[test]
    fn test_magic_numbers_are_recognised() {
        let mut png = NamedTempFile::new().unwrap();
        png.write_all(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D])
            .unwrap();

        let guess = sniff_media_type(Path::new(MISSING_FILE_CMD), png.path());
        assert_eq!(guess.media_type.as_deref(), Some("image"));
        assert_eq!(guess.subtype.as_deref(), Some("png"));
    }

    #[test]
    fn test_unknown_content_without_fallback_is_empty() {
        let mut text = NamedTempFile::new().unwrap();
        text.write_all(b"plain words").unwrap();

        let guess = sniff_media_type(Path::new(MISSING_FILE_CMD), text.path());
        assert!(guess.is_empty());
    }
}
