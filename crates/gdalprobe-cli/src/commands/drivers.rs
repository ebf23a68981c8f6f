use crate::cli::DriversArgs;
use crate::output::OutputWriter;
use crate::output_types::DriverRow;
use anyhow::Result;
use gdalprobe_core::{binding, checks, RasterLibrary};
use std::process::ExitCode;

pub fn execute(args: DriversArgs, output: &OutputWriter) -> Result<ExitCode> {
    let library = binding::load()?;

    let count = library.driver_count()?;
    let entries = checks::list_drivers(&library, count, args.limit.unwrap_or(count))?;

    output.section(format!("Registered drivers ({} of {})", entries.len(), count));
    output.table(entries.into_iter().map(DriverRow::from).collect())?;

    Ok(ExitCode::SUCCESS)
}
