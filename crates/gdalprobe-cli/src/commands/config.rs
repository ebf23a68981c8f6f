use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use gdalprobe_core::config::LayeredConfig;
use std::path::Path;
use std::process::ExitCode;

pub fn execute(config_path: Option<&Path>, output: &OutputWriter) -> Result<ExitCode> {
    let config = LayeredConfig::load(config_path)?;
    config.validate()?;

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.section("Configuration");
    output.table(rows)?;

    Ok(ExitCode::SUCCESS)
}
