//! The diagnostic checklist
//!
//! A single linear pass over read-only library queries. Each completed step
//! is handed to an observer so callers can print progressively; the first
//! `Err` aborts the remaining steps.

use crate::binding::{RasterHandle, RasterLibrary, MEMORY_DRIVER};
use crate::config::{LayeredConfig, DEFAULT_KEY_DRIVERS};
use crate::environment::EnvironmentInfo;
use crate::error::Result;
use crate::report::{
    CheckReport, ConfigOption, DriverEntry, DriverPresence, LibraryVersion, MemoryDatasetOutcome,
    MemoryDatasetSpec, Profile,
};

/// Library configuration options reported by the full profile
pub const CONFIG_OPTION_KEYS: [&str; 2] = ["GDAL_DATA", "GDAL_DRIVER_PATH"];

/// What a checklist run will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckPlan {
    pub profile: Profile,
    /// `None` skips the key driver check
    pub key_drivers: Option<Vec<String>>,
    pub list_limit: usize,
    pub memory_dataset: MemoryDatasetSpec,
    /// `None` skips the configuration option report
    pub config_keys: Option<Vec<String>>,
}

impl CheckPlan {
    /// Plan with the built-in constants for a profile
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            key_drivers: profile
                .checks_key_drivers()
                .then(|| DEFAULT_KEY_DRIVERS.iter().map(|d| d.to_string()).collect()),
            list_limit: profile.default_list_limit(),
            memory_dataset: MemoryDatasetSpec::default(),
            config_keys: profile
                .reports_config_options()
                .then(|| CONFIG_OPTION_KEYS.iter().map(|k| k.to_string()).collect()),
        }
    }

    /// Plan for a profile with configured overrides applied
    pub fn from_config(profile: Profile, config: &LayeredConfig) -> Result<Self> {
        config.validate()?;

        let mut plan = Self::for_profile(profile);
        if plan.key_drivers.is_some() {
            plan.key_drivers = Some(config.key_drivers.value.clone());
        }
        if let Some(limit) = config.list_limit.value {
            plan.list_limit = limit;
        }
        plan.memory_dataset = config.memory_dataset();

        Ok(plan)
    }
}

/// A completed checklist step
#[derive(Debug, Clone, Copy)]
pub enum CheckStep<'a> {
    Version(&'a LibraryVersion),
    DriverCount(usize),
    KeyDrivers(&'a [DriverPresence]),
    Drivers {
        limit: usize,
        entries: &'a [DriverEntry],
    },
    MemoryDataset {
        spec: &'a MemoryDatasetSpec,
        outcome: &'a MemoryDatasetOutcome,
    },
    Environment(&'a EnvironmentInfo),
    ConfigOptions(&'a [ConfigOption]),
}

/// Release name only; the lightest check that the binding answers
pub fn probe<L: RasterLibrary>(library: &L) -> Result<String> {
    library.version_info("RELEASE_NAME")
}

pub fn library_version<L: RasterLibrary>(library: &L) -> Result<LibraryVersion> {
    Ok(LibraryVersion {
        release_name: library.version_info("RELEASE_NAME")?,
        version_num: library.version_info("VERSION_NUM")?,
    })
}

/// Look up each driver by name
pub fn key_driver_presence<L: RasterLibrary>(
    library: &L,
    names: &[String],
) -> Result<Vec<DriverPresence>> {
    names
        .iter()
        .map(|name| {
            let available = library.driver_by_name(name)?.is_some();
            tracing::debug!(driver = %name, available, "Key driver lookup");
            Ok(DriverPresence {
                name: name.clone(),
                available,
            })
        })
        .collect()
}

/// The first `min(limit, count)` drivers, skipping empty registry slots
pub fn list_drivers<L: RasterLibrary>(
    library: &L,
    count: usize,
    limit: usize,
) -> Result<Vec<DriverEntry>> {
    let mut entries = Vec::new();
    for i in 0..limit.min(count) {
        if let Some(driver) = library.driver(i)? {
            entries.push(DriverEntry {
                index: i + 1,
                short_name: driver.short_name,
                long_name: driver.long_name,
            });
        }
    }
    Ok(entries)
}

/// Create, inspect and release a transient dataset with the `MEM` driver
///
/// The handle is dropped on every path out of this function, including a
/// failed property read.
pub fn memory_dataset_check<L: RasterLibrary>(
    library: &L,
    spec: &MemoryDatasetSpec,
) -> Result<MemoryDatasetOutcome> {
    if library.driver_by_name(MEMORY_DRIVER)?.is_none() {
        return Ok(MemoryDatasetOutcome::DriverMissing {
            driver: MEMORY_DRIVER.to_string(),
        });
    }

    let dataset = match library.create_dataset(MEMORY_DRIVER, spec) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::debug!(error = %e, "In-memory dataset creation failed");
            return Ok(MemoryDatasetOutcome::CreationFailed {
                reason: e.to_string(),
            });
        }
    };

    let (width, height) = dataset.raster_size()?;
    let bands = dataset.raster_count()?;
    drop(dataset);

    Ok(MemoryDatasetOutcome::Created {
        width,
        height,
        bands,
    })
}

pub fn config_options<L: RasterLibrary>(library: &L, keys: &[String]) -> Result<Vec<ConfigOption>> {
    keys.iter()
        .map(|key| {
            Ok(ConfigOption {
                key: key.clone(),
                value: library.config_option(key)?,
            })
        })
        .collect()
}

/// Run the whole checklist for a plan
pub fn run_checklist<L, F>(library: &L, plan: &CheckPlan, mut observe: F) -> Result<CheckReport>
where
    L: RasterLibrary,
    F: FnMut(CheckStep<'_>),
{
    let checked_at = chrono::Utc::now();

    tracing::debug!("Querying library version");
    let version = library_version(library)?;
    observe(CheckStep::Version(&version));

    let driver_count = library.driver_count()?;
    tracing::debug!(driver_count, "Driver registry queried");
    observe(CheckStep::DriverCount(driver_count));

    let key_drivers = match &plan.key_drivers {
        Some(names) => {
            let presence = key_driver_presence(library, names)?;
            observe(CheckStep::KeyDrivers(&presence));
            presence
        }
        None => Vec::new(),
    };

    let drivers = list_drivers(library, driver_count, plan.list_limit)?;
    observe(CheckStep::Drivers {
        limit: plan.list_limit,
        entries: &drivers,
    });

    tracing::debug!(spec = ?plan.memory_dataset, "Creating in-memory dataset");
    let memory_dataset = memory_dataset_check(library, &plan.memory_dataset)?;
    observe(CheckStep::MemoryDataset {
        spec: &plan.memory_dataset,
        outcome: &memory_dataset,
    });

    let environment = EnvironmentInfo::capture();
    observe(CheckStep::Environment(&environment));

    let config_options = match &plan.config_keys {
        Some(keys) => {
            let options = config_options(library, keys)?;
            observe(CheckStep::ConfigOptions(&options));
            options
        }
        None => Vec::new(),
    };

    Ok(CheckReport {
        profile: plan.profile,
        checked_at,
        version,
        driver_count,
        key_drivers,
        drivers,
        memory_dataset,
        environment,
        config_options,
    })
}
