//! Command implementations

mod check;
mod config;
mod drivers;
mod probe;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;
use std::process::ExitCode;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<ExitCode> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Check(args) => check::execute(args, config_path, &output),
        Commands::Probe => probe::execute(&output),
        Commands::Drivers(args) => drivers::execute(args, &output),
        Commands::Config => config::execute(config_path, &output),
    }
}
