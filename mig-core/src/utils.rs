//! Utility functions for decoding and number handling.
//!
//! This module provides small helpers shared by the probe parsers: turning
//! raw tool output into text, and reading the loosely typed numbers the
//! tools print.

use std::path::Path;

/// Decodes tool output as text.
///
/// Valid UTF-8 is used as is. Anything else is re-read as ISO-8859-1, where
/// every byte maps to the code point of the same value, so decoding never
/// fails.
#[must_use]
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::debug!("Output is not valid UTF-8, re-decoding as ISO-8859-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Parses a rational such as `30000/1001` or a plain number such as `25`.
///
/// Returns None for malformed input, a zero denominator, or a non-finite
/// result.
#[must_use]
pub fn parse_rational(value: &str) -> Option<f64> {
    let value = value.trim();
    let parsed = match value.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.parse::<f64>().ok()?,
    };
    parsed.is_finite().then_some(parsed)
}

/// Rounds to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Renders a command line for logging and for the ffprobe record.
#[must_use]
pub fn format_command(program: &Path, args: &[&std::ffi::OsStr]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(args.iter().map(|arg| {
        let arg = arg.to_string_lossy();
        if arg.contains(char::is_whitespace) || arg.contains('\'') {
            format!("'{}'", arg.replace('\'', "'\\''"))
        } else {
            arg.into_owned()
        }
    }));
    parts.join(" ")
}
