use crate::output::OutputWriter;
use crate::output_types::ProbeOutput;
use anyhow::Result;
use gdalprobe_core::{binding, checks, Capabilities};
use std::process::ExitCode;

pub fn execute(output: &OutputWriter) -> Result<ExitCode> {
    output.section("GDAL binding probe");

    let library = binding::load()?;
    output.check(true, "GDAL binding loaded");

    let release_name = checks::probe(&library)?;
    output.kv("GDAL version", &release_name);

    output.result(ProbeOutput {
        capabilities: Capabilities::detect(),
        release_name,
    })?;
    output.success("Probe passed");

    Ok(ExitCode::SUCCESS)
}
