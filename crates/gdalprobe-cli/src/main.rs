//! gdalprobe CLI - Command-line interface
//!
//! Loads the GDAL binding, runs the diagnostic checklist and exits non-zero
//! on any failure.

mod cli;
mod commands;
mod errors;
mod output;
mod output_types;

use clap::Parser;
use cli::Cli;
use output::OutputWriter;
use std::process::ExitCode;

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so the checklist stays readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(cli.verbose))),
        )
        .init();

    let json = cli.json;

    match commands::execute(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("Diagnostics aborted: {:?}", err);
            if json {
                OutputWriter::new(true).error(&err);
            } else {
                errors::from_anyhow(&err).display();
            }
            ExitCode::FAILURE
        }
    }
}
