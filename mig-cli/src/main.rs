// mig-cli/src/main.rs
//
// Entry point for the `mig` binary: parses arguments, sets up logging and
// runs one gathering pass. Exits with status 1 on a fatal error.

use clap::Parser;
use mig_cli::{Cli, ConsoleTarget, init_logging, run};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(
        cli.log_level.into(),
        cli.console_target(),
        cli.log_to_file.as_deref(),
    ) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        if cli.console_target() != Some(ConsoleTarget::Stderr) {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}
