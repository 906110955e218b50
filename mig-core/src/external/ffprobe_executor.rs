//! Runs ffprobe to get its JSON report of a file's format and streams.

use crate::error::CoreResult;
use std::ffi::OsStr;
use std::path::Path;

use super::{ToolOutput, run_tool};

/// Arguments placed before the input path.
pub const FFPROBE_ARGS: [&str; 6] = [
    "-v",
    "quiet",
    "-print_format",
    "json",
    "-show_format",
    "-show_streams",
];

/// Runs `<ffprobe_cmd> -v quiet -print_format json -show_format -show_streams <path>`.
pub fn run_ffprobe(ffprobe_cmd: &Path, input_path: &Path) -> CoreResult<ToolOutput> {
    log::debug!("Running ffprobe on: {}", input_path.display());
    let mut args: Vec<&OsStr> = FFPROBE_ARGS.iter().map(OsStr::new).collect();
    args.push(input_path.as_os_str());
    run_tool(ffprobe_cmd, &args)
}
