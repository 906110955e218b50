//! Runs exiftool to get every tag of a file as grouped JSON.

use crate::error::CoreResult;
use std::ffi::OsStr;
use std::path::Path;

use super::{ToolOutput, run_tool};

/// `-g` groups tags by family, `-a` keeps duplicate tags.
pub const EXIFTOOL_ARGS: [&str; 3] = ["-g", "-a", "-json"];

/// Runs `<exiftool_cmd> -g -a -json <path>`.
pub fn run_exiftool(exiftool_cmd: &Path, input_path: &Path) -> CoreResult<ToolOutput> {
    log::debug!("Running exiftool on: {}", input_path.display());
    let mut args: Vec<&OsStr> = EXIFTOOL_ARGS.iter().map(OsStr::new).collect();
    args.push(input_path.as_os_str());
    run_tool(exiftool_cmd, &args)
}
