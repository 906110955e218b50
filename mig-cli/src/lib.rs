// mig-cli/src/lib.rs
//
// Library portion of the mig CLI application.
// Contains argument definitions, logging setup and the run logic.

pub mod cli;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, ConsoleTarget, LogLevel};
pub use error::{CliError, CliResult};
pub use logging::init_logging;

use mig_core::{GatherConfig, GatherConfigBuilder, Gatherer, MetadataReport};
use std::io::Write;

/// Builds the gathering configuration from parsed arguments.
pub fn build_config(cli: &Cli) -> GatherConfig {
    let mut builder = GatherConfigBuilder::new().enabled_sources(cli.enabled_sources());
    if let Some(path) = &cli.exiftool_cmd_path {
        builder = builder.exiftool_cmd_path(path);
    }
    if let Some(path) = &cli.ffprobe_cmd_path {
        builder = builder.ffprobe_cmd_path(path);
    }
    if let Some(path) = &cli.mediainfo_cmd_path {
        builder = builder.mediainfo_cmd_path(path);
    }
    if let Some(path) = &cli.output_file {
        builder = builder.output_file(path);
    }
    builder.build()
}

/// Gathers metadata for the file named on the command line and prints the
/// report unless console output is disabled.
pub fn run(cli: &Cli) -> CliResult<MetadataReport> {
    let config = build_config(cli);
    log::debug!("Options loaded. {:?}", config);

    let report = Gatherer::new(config).run(&cli.media_file_path)?;

    if !cli.no_output_to_console {
        let json = report.to_json_pretty()?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", json).map_err(CliError::Output)?;
    }

    Ok(report)
}
