//! ExifTool's grouped JSON output.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::utils::decode_text;

/// Metadata for one file as reported by `exiftool -g -a -json`.
///
/// The object keeps exiftool's own grouping (`File`, `QuickTime`, `XMP`, ...)
/// and is passed through to the report untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExiftoolRecord(Value);

impl ExiftoolRecord {
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// The `MIMEType` tag, looked up at the top level and then in the `File` group.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.0
            .get("MIMEType")
            .and_then(Value::as_str)
            .or_else(|| {
                self.0
                    .get("File")
                    .and_then(|group| group.get("MIMEType"))
                    .and_then(Value::as_str)
            })
    }
}

/// Parses exiftool's JSON array and keeps the entry for the probed file.
pub fn parse_exiftool_output(bytes: Vec<u8>) -> CoreResult<ExiftoolRecord> {
    let text = decode_text(bytes);
    let parsed: Value = serde_json::from_str(&text)
        .map_err(|e| CoreError::JsonParseError(format!("exiftool output: {}", e)))?;

    match parsed {
        Value::Array(mut entries) if !entries.is_empty() => {
            Ok(ExiftoolRecord(entries.swap_remove(0)))
        }
        Value::Array(_) => Err(CoreError::UnexpectedOutput {
            tool: "exiftool".to_string(),
            message: "empty result array".to_string(),
        }),
        other => Err(CoreError::UnexpectedOutput {
            tool: "exiftool".to_string(),
            message: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
