use crate::cli::CheckArgs;
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use console::style;
use gdalprobe_core::binding;
use gdalprobe_core::config::{CliConfigOverrides, LayeredConfig};
use gdalprobe_core::environment::EnvVar;
use gdalprobe_core::report::MemoryDatasetOutcome;
use gdalprobe_core::{run_checklist, CheckPlan, CheckStep, Profile};
use std::path::Path;
use std::process::ExitCode;

const NOT_SET: &str = "not set";

pub fn execute(args: CheckArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<ExitCode> {
    let profile = Profile::from(args.profile);

    let mut config = LayeredConfig::load(config_path)?;
    config.update_from_cli(CliConfigOverrides {
        key_drivers: (!args.drivers.is_empty()).then_some(args.drivers),
        list_limit: args.limit,
    });
    let plan = CheckPlan::from_config(profile, &config)?;

    output.section(format!("GDAL binding check ({} profile)", profile));

    let library = binding::load()?;
    output.check(true, "GDAL binding loaded");

    let report = run_checklist(&library, &plan, |step| render_step(step, output))?;

    let failure = if args.strict { report.strict_failure() } else { None };
    if let Some(failure) = failure {
        if output.is_json() {
            output.failure(&report, &failure)?;
        } else {
            println!();
            errors::strict_check_failed(&failure).display();
        }
        return Ok(ExitCode::FAILURE);
    }

    output.result(&report)?;

    if !report.is_clean() {
        output.warning("Some checks did not pass (use --strict to fail on them)");
    }

    output.line("");
    output.success(style("GDAL binding check complete").green());

    Ok(ExitCode::SUCCESS)
}

fn env_value(var: &EnvVar) -> &str {
    var.value.as_deref().unwrap_or(NOT_SET)
}

/// Print a completed step as soon as it is reported
fn render_step(step: CheckStep<'_>, output: &OutputWriter) {
    match step {
        CheckStep::Version(version) => {
            output.kv("GDAL version", &version.release_name);
            output.kv("GDAL version number", &version.version_num);
        }
        CheckStep::DriverCount(count) => {
            output.kv("Registered drivers", count);
        }
        CheckStep::KeyDrivers(presence) => {
            output.section("Key drivers");
            for driver in presence {
                let state = if driver.available { "available" } else { "not available" };
                output.check(driver.available, format!("{} driver {}", driver.name, state));
            }
        }
        CheckStep::Drivers { limit, entries } => {
            output.section(format!("Supported formats (first {})", limit));
            for entry in entries {
                output.line(format!(
                    "  {}. {} - {}",
                    entry.index, entry.short_name, entry.long_name
                ));
            }
        }
        CheckStep::MemoryDataset { spec, outcome } => {
            output.section("In-memory dataset");
            match outcome {
                MemoryDatasetOutcome::Created {
                    width,
                    height,
                    bands,
                } => {
                    output.check(
                        true,
                        format!(
                            "Created {}x{} dataset with {} band(s)",
                            spec.width, spec.height, spec.bands
                        ),
                    );
                    output.kv("  Width", width);
                    output.kv("  Height", height);
                    output.kv("  Bands", bands);
                }
                MemoryDatasetOutcome::DriverMissing { driver } => {
                    output.check(false, format!("{} driver not available", driver));
                }
                MemoryDatasetOutcome::CreationFailed { reason } => {
                    output.check(false, format!("In-memory dataset creation failed: {}", reason));
                }
            }
        }
        CheckStep::Environment(env) => {
            output.section("Runtime environment");
            output.kv("Toolchain", &env.toolchain);
            output.kv("Vendor", &env.vendor);
            output.kv("Operating system", format!("{} {}", env.os, env.arch));
            output.kv("Target", &env.target);
            output.kv(&env.gdal_home.name, env_value(&env.gdal_home));
            output.kv(&env.library_path.name, env_value(&env.library_path));
        }
        CheckStep::ConfigOptions(options) => {
            output.section("GDAL configuration");
            for option in options {
                output.kv(&option.key, option.value.as_deref().unwrap_or(NOT_SET));
            }
        }
    }
}
