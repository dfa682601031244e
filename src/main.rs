//! `brewsync` command-line entry point.
use std::sync::Arc;

use anyhow::Result;
use brewsync::cli::{self, Command};
use brewsync::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::parse();
    let command = args.subcommand();

    if command == Command::Version {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, command.log_name());
    let log = Arc::new(logging::Logger::new(command.log_name()));

    match command {
        Command::Install => commands::install::run(&args.global, &log),
        Command::Check => commands::check::run(&args.global, &log),
        Command::Version => Ok(()),
    }
}
