//! Report model for the diagnostic checklist
//!
//! Every value here is copied out of the native library; no struct holds
//! a library handle.

use crate::environment::EnvironmentInfo;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Check profile, mirroring the depth of the checklist to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Versions, key drivers, first 15 drivers, memory dataset, environment, config options
    Full,
    /// Versions, first 10 drivers, memory dataset, environment
    Basic,
}

impl Profile {
    /// Number of drivers listed when no limit is configured
    pub fn default_list_limit(&self) -> usize {
        match self {
            Profile::Full => 15,
            Profile::Basic => 10,
        }
    }

    pub fn checks_key_drivers(&self) -> bool {
        matches!(self, Profile::Full)
    }

    pub fn reports_config_options(&self) -> bool {
        matches!(self, Profile::Full)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Full => write!(f, "full"),
            Profile::Basic => write!(f, "basic"),
        }
    }
}

/// Human-readable release name and numeric version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryVersion {
    pub release_name: String,
    pub version_num: String,
}

/// Short and long name of a registered driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverInfo {
    pub short_name: String,
    pub long_name: String,
}

/// A listed driver with its 1-based position in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverEntry {
    pub index: usize,
    pub short_name: String,
    pub long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverPresence {
    pub name: String,
    pub available: bool,
}

/// Dimensions of the transient in-memory dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryDatasetSpec {
    pub width: usize,
    pub height: usize,
    pub bands: usize,
}

impl Default for MemoryDatasetSpec {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            bands: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MemoryDatasetOutcome {
    Created {
        width: usize,
        height: usize,
        bands: usize,
    },
    DriverMissing {
        driver: String,
    },
    CreationFailed {
        reason: String,
    },
}

impl MemoryDatasetOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, MemoryDatasetOutcome::Created { .. })
    }
}

/// A library configuration option; `None` when unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigOption {
    pub key: String,
    pub value: Option<String>,
}

/// Full result of a checklist run
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub profile: Profile,
    pub checked_at: DateTime<Utc>,
    pub version: LibraryVersion,
    pub driver_count: usize,
    pub key_drivers: Vec<DriverPresence>,
    pub drivers: Vec<DriverEntry>,
    pub memory_dataset: MemoryDatasetOutcome,
    pub environment: EnvironmentInfo,
    pub config_options: Vec<ConfigOption>,
}

impl CheckReport {
    /// Key drivers that were looked up but are not registered
    pub fn missing_key_drivers(&self) -> Vec<&str> {
        self.key_drivers
            .iter()
            .filter(|d| !d.available)
            .map(|d| d.name.as_str())
            .collect()
    }

    /// True when every key driver is present and the memory dataset was created
    pub fn is_clean(&self) -> bool {
        self.missing_key_drivers().is_empty() && self.memory_dataset.is_created()
    }

    /// Findings that fail a strict run, `None` when the report is clean
    pub fn strict_failure(&self) -> Option<StrictFailure> {
        if self.is_clean() {
            return None;
        }
        Some(StrictFailure {
            missing_drivers: self
                .missing_key_drivers()
                .into_iter()
                .map(String::from)
                .collect(),
            memory_dataset_ok: self.memory_dataset.is_created(),
        })
    }
}

/// Why a strict run failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrictFailure {
    pub missing_drivers: Vec<String>,
    pub memory_dataset_ok: bool,
}

impl fmt::Display for StrictFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reasons = Vec::new();
        if !self.missing_drivers.is_empty() {
            reasons.push(format!("missing drivers [{}]", self.missing_drivers.join(", ")));
        }
        if !self.memory_dataset_ok {
            reasons.push("in-memory dataset check failed".to_string());
        }
        write!(f, "Strict check failed: {}", reasons.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        assert_eq!(Profile::Full.default_list_limit(), 15);
        assert_eq!(Profile::Basic.default_list_limit(), 10);
        assert!(Profile::Full.checks_key_drivers());
        assert!(!Profile::Basic.checks_key_drivers());
        assert!(!Profile::Basic.reports_config_options());
    }

    #[test]
    fn test_memory_dataset_spec_default() {
        let spec = MemoryDatasetSpec::default();
        assert_eq!((spec.width, spec.height, spec.bands), (100, 100, 1));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = MemoryDatasetOutcome::DriverMissing {
            driver: "MEM".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "driver_missing");
        assert_eq!(json["driver"], "MEM");
    }

    fn report(key_drivers: &[(&str, bool)], memory_dataset: MemoryDatasetOutcome) -> CheckReport {
        CheckReport {
            profile: Profile::Full,
            checked_at: Utc::now(),
            version: LibraryVersion {
                release_name: "3.8.4".to_string(),
                version_num: "3080400".to_string(),
            },
            driver_count: 1,
            key_drivers: key_drivers
                .iter()
                .map(|(name, available)| DriverPresence {
                    name: name.to_string(),
                    available: *available,
                })
                .collect(),
            drivers: Vec::new(),
            memory_dataset,
            environment: EnvironmentInfo::capture(),
            config_options: Vec::new(),
        }
    }

    fn created() -> MemoryDatasetOutcome {
        MemoryDatasetOutcome::Created {
            width: 100,
            height: 100,
            bands: 1,
        }
    }

    #[test]
    fn test_clean_report_has_no_strict_failure() {
        let report = report(&[("GTiff", true), ("PNG", true)], created());
        assert!(report.is_clean());
        assert_eq!(report.strict_failure(), None);
    }

    #[test]
    fn test_missing_driver_fails_strict_run() {
        let report = report(&[("GTiff", true), ("NoSuchDriver", false)], created());

        let failure = report.strict_failure().unwrap();
        assert_eq!(failure.missing_drivers, vec!["NoSuchDriver"]);
        assert!(failure.memory_dataset_ok);
        assert_eq!(
            failure.to_string(),
            "Strict check failed: missing drivers [NoSuchDriver]"
        );
    }

    #[test]
    fn test_failed_memory_dataset_fails_strict_run() {
        let report = report(
            &[("GTiff", true)],
            MemoryDatasetOutcome::CreationFailed {
                reason: "out of memory".to_string(),
            },
        );

        let failure = report.strict_failure().unwrap();
        assert!(failure.missing_drivers.is_empty());
        assert!(!failure.memory_dataset_ok);
        assert!(failure.to_string().contains("in-memory dataset check failed"));
    }
}
