//! Runs mediainfo to get its default text report for a file.

use crate::error::CoreResult;
use std::path::Path;

use super::{ToolOutput, run_tool};

/// Runs `<mediainfo_cmd> <path>`.
///
/// The text report is returned undecoded; the section parser handles non
/// UTF-8 output.
pub fn run_mediainfo(mediainfo_cmd: &Path, input_path: &Path) -> CoreResult<ToolOutput> {
    log::debug!("Running mediainfo on: {}", input_path.display());
    run_tool(mediainfo_cmd, &[input_path.as_os_str()])
}
