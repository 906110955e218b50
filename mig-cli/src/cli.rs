// mig-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use mig_core::ProbeSource;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "mig",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "mig: Media information gatherer",
    long_about = "Probes a media file with mediainfo, ffprobe, exiftool and MIME sniffing, \
                  and prints the merged metadata as JSON."
)]
pub struct Cli {
    /// Media file to gather information about
    #[arg(required = true, value_name = "MEDIA_FILE_PATH")]
    pub media_file_path: PathBuf,

    /// Log level
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Warn, ignore_case = true)]
    pub log_level: LogLevel,

    /// exiftool executable
    #[arg(long, alias = "exif-cmd-path", value_name = "PATH", env = "MIG_EXIFTOOL_CMD_PATH")]
    pub exiftool_cmd_path: Option<PathBuf>,

    /// ffprobe executable
    #[arg(long, value_name = "PATH", env = "MIG_FFPROBE_CMD_PATH")]
    pub ffprobe_cmd_path: Option<PathBuf>,

    /// mediainfo executable
    #[arg(long, value_name = "PATH", env = "MIG_MEDIAINFO_CMD_PATH")]
    pub mediainfo_cmd_path: Option<PathBuf>,

    /// Modules to run (exiftool, filemagic, ffprobe, mediainfo). Defaults to all of them.
    #[arg(
        short = 'e',
        long = "enable-modules",
        value_delimiter = ',',
        value_name = "x,y,z",
        value_parser = parse_module
    )]
    pub enable_modules: Option<Vec<ProbeSource>>,

    /// Where console log lines go
    #[arg(
        long,
        value_enum,
        value_name = "stdout|stderr",
        default_value_t = ConsoleTarget::Stderr,
        conflicts_with = "no_log_to_console"
    )]
    pub log_to_console: ConsoleTarget,

    /// Do not log to the console
    #[arg(long, default_value_t = false)]
    pub no_log_to_console: bool,

    /// Also append log lines to this file
    #[arg(short = 'L', long, value_name = "DEST")]
    pub log_to_file: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Do not print the JSON report to stdout
    #[arg(long, default_value_t = false)]
    pub no_output_to_console: bool,
}

impl Cli {
    /// Console log destination, or None when console logging is off.
    pub fn console_target(&self) -> Option<ConsoleTarget> {
        (!self.no_log_to_console).then_some(self.log_to_console)
    }

    /// Enabled sources, all of them unless `--enable-modules` was given.
    pub fn enabled_sources(&self) -> Vec<ProbeSource> {
        self.enable_modules
            .clone()
            .unwrap_or_else(|| ProbeSource::ALL.to_vec())
    }
}

fn parse_module(value: &str) -> Result<ProbeSource, String> {
    value.parse::<ProbeSource>().map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    #[value(alias = "fatal")]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mig", "clip.mov"]).unwrap();
        assert_eq!(cli.media_file_path, PathBuf::from("clip.mov"));
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.console_target(), Some(ConsoleTarget::Stderr));
        assert_eq!(cli.enabled_sources(), ProbeSource::ALL.to_vec());
        assert!(!cli.no_output_to_console);
    }

    #[test]
    fn test_module_list() {
        let cli = Cli::try_parse_from(["mig", "-e", "ffprobe,MediaInfo", "clip.mov"]).unwrap();
        assert_eq!(
            cli.enabled_sources(),
            vec![ProbeSource::Ffprobe, ProbeSource::Mediainfo]
        );
        assert!(Cli::try_parse_from(["mig", "-e", "avprobe", "clip.mov"]).is_err());
    }

    #[test]
    fn test_logging_options() {
        let cli = Cli::try_parse_from([
            "mig",
            "--log-level",
            "DEBUG",
            "--no-log-to-console",
            "-L",
            "/tmp/mig.log",
            "clip.mov",
        ])
        .unwrap();
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Debug);
        assert_eq!(cli.console_target(), None);
        assert_eq!(cli.log_to_file, Some(PathBuf::from("/tmp/mig.log")));

        let cli = Cli::try_parse_from(["mig", "-l", "fatal", "--log-to-console", "stdout", "x"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Error);
        assert_eq!(cli.console_target(), Some(ConsoleTarget::Stdout));
    }

    #[test]
    fn test_media_file_path_is_required() {
        assert!(Cli::try_parse_from(["mig"]).is_err());
    }
}
