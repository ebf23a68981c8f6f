use crate::error::{ProbeError, Result};
use crate::report::MemoryDatasetSpec;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Drivers whose registration is reported by the full profile
pub const DEFAULT_KEY_DRIVERS: [&str; 6] = ["GTiff", "PNG", "JPEG", "HDF5", "HDF4", "netCDF"];

/// Config file picked up from the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "gdalprobe.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the checklist
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub key_drivers: ConfigValue<Vec<String>>,
    /// `None` defers to the profile's default
    pub list_limit: ConfigValue<Option<usize>>,
    pub memory_width: ConfigValue<usize>,
    pub memory_height: ConfigValue<usize>,
    pub memory_bands: ConfigValue<usize>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let memory = MemoryDatasetSpec::default();
        Self {
            key_drivers: ConfigValue::new(
                DEFAULT_KEY_DRIVERS.iter().map(|d| d.to_string()).collect(),
                ConfigSource::Default,
            ),
            list_limit: ConfigValue::new(None, ConfigSource::Default),
            memory_width: ConfigValue::new(memory.width, ConfigSource::Default),
            memory_height: ConfigValue::new(memory.height, ConfigSource::Default),
            memory_bands: ConfigValue::new(memory.bands, ConfigSource::Default),
        }
    }

    /// Defaults, then the config file, then the environment
    ///
    /// Without an explicit path, `gdalprobe.toml` in the current directory is
    /// used if it exists.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::with_defaults();

        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => discover_config_file(&env::current_dir()?),
        };

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading config file");
            config = config.load_from_file(&path)?;
        }

        Ok(config.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ProbeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ProbeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(drivers) = file_config.key_drivers {
            self.key_drivers.update(drivers, ConfigSource::File);
        }

        if let Some(limit) = file_config.list_limit {
            self.list_limit.update(Some(limit), ConfigSource::File);
        }

        if let Some(width) = file_config.memory_width {
            self.memory_width.update(width, ConfigSource::File);
        }

        if let Some(height) = file_config.memory_height {
            self.memory_height.update(height, ConfigSource::File);
        }

        if let Some(bands) = file_config.memory_bands {
            self.memory_bands.update(bands, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GDALPROBE_KEY_DRIVERS
        if let Ok(drivers_str) = env::var("GDALPROBE_KEY_DRIVERS") {
            match parse_driver_list(&drivers_str) {
                Ok(drivers) => self.key_drivers.update(drivers, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GDALPROBE_KEY_DRIVERS value '{}': expected comma-separated driver names",
                    drivers_str
                ),
            }
        }

        // GDALPROBE_LIST_LIMIT
        if let Ok(limit_str) = env::var("GDALPROBE_LIST_LIMIT") {
            match parse_list_limit(&limit_str) {
                Ok(limit) => self.list_limit.update(Some(limit), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GDALPROBE_LIST_LIMIT value '{}': expected a non-negative integer",
                    limit_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(drivers) = overrides.key_drivers {
            self.key_drivers.update(drivers, ConfigSource::Cli);
        }

        if let Some(limit) = overrides.list_limit {
            self.list_limit.update(Some(limit), ConfigSource::Cli);
        }
    }

    /// Reject dataset dimensions the library would refuse
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("memory_width", self.memory_width.value),
            ("memory_height", self.memory_height.value),
            ("memory_bands", self.memory_bands.value),
        ] {
            if value == 0 {
                return Err(ProbeError::ConfigInvalid {
                    key: key.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn memory_dataset(&self) -> MemoryDatasetSpec {
        MemoryDatasetSpec {
            width: self.memory_width.value,
            height: self.memory_height.value,
            bands: self.memory_bands.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "key_drivers".to_string(),
            (self.key_drivers.value.join(","), self.key_drivers.source),
        );

        map.insert(
            "list_limit".to_string(),
            (
                self.list_limit
                    .value
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "profile default".to_string()),
                self.list_limit.source,
            ),
        );

        let memory = self.memory_dataset();
        map.insert(
            "memory_dataset".to_string(),
            (
                format!("{}x{}x{}", memory.width, memory.height, memory.bands),
                [
                    self.memory_width.source,
                    self.memory_height.source,
                    self.memory_bands.source,
                ]
                .into_iter()
                .max_by_key(|s| s.precedence())
                .unwrap_or(ConfigSource::Default),
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize)]
struct FileConfig {
    key_drivers: Option<Vec<String>>,
    list_limit: Option<usize>,
    memory_width: Option<usize>,
    memory_height: Option<usize>,
    memory_bands: Option<usize>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub key_drivers: Option<Vec<String>>,
    pub list_limit: Option<usize>,
}

/// Find `gdalprobe.toml` in a directory
pub fn discover_config_file(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Parse a comma-separated driver list
pub fn parse_driver_list(s: &str) -> Result<Vec<String>> {
    let drivers: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
        .collect();

    if drivers.is_empty() {
        return Err(ProbeError::ConfigInvalid {
            key: "key_drivers".to_string(),
            reason: format!("No driver names in '{}'", s),
        });
    }

    Ok(drivers)
}

/// Parse the number of drivers to list
pub fn parse_list_limit(s: &str) -> Result<usize> {
    s.trim().parse::<usize>().map_err(|_| ProbeError::ConfigInvalid {
        key: "list_limit".to_string(),
        reason: format!("Invalid list limit: {}. Use a non-negative integer", s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.key_drivers.value, DEFAULT_KEY_DRIVERS);
        assert_eq!(config.key_drivers.source, ConfigSource::Default);
        assert_eq!(config.list_limit.value, None);
        assert_eq!(config.memory_dataset(), MemoryDatasetSpec::default());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
key_drivers = ["GTiff", "COG"]
list_limit = 5
memory_width = 64
memory_height = 32
memory_bands = 3
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.key_drivers.value, vec!["GTiff", "COG"]);
        assert_eq!(config.key_drivers.source, ConfigSource::File);
        assert_eq!(config.list_limit.value, Some(5));
        assert_eq!(
            config.memory_dataset(),
            MemoryDatasetSpec {
                width: 64,
                height: 32,
                bands: 3
            }
        );
    }

    #[test]
    fn test_load_from_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "list_limit = \"many\"").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigInvalid { ref key, .. } if key == "file"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            key_drivers: None,
            list_limit: Some(3),
        });

        assert_eq!(config.list_limit.value, Some(3));
        assert_eq!(config.list_limit.source, ConfigSource::Cli);
        assert_eq!(config.key_drivers.source, ConfigSource::Default);
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut config = LayeredConfig::with_defaults();
        assert!(config.validate().is_ok());

        config.memory_bands.update(0, ConfigSource::File);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("memory_bands"));
    }

    #[test]
    fn test_parse_driver_list() {
        assert_eq!(parse_driver_list("GTiff, PNG,,JPEG ").unwrap(), vec!["GTiff", "PNG", "JPEG"]);
        assert!(parse_driver_list(" , ").is_err());
    }

    #[test]
    fn test_parse_list_limit() {
        assert_eq!(parse_list_limit("15").unwrap(), 15);
        assert_eq!(parse_list_limit(" 0 ").unwrap(), 0);
        assert!(parse_list_limit("-1").is_err());
        assert!(parse_list_limit("ten").is_err());
    }

    #[test]
    fn test_discover_config_file() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config_file(dir.path()).is_none());

        fs::write(dir.path().join(CONFIG_FILE_NAME), "list_limit = 2\n").unwrap();
        assert_eq!(
            discover_config_file(dir.path()),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        let (drivers, source) = &map["key_drivers"];
        assert_eq!(drivers, "GTiff,PNG,JPEG,HDF5,HDF4,netCDF");
        assert_eq!(*source, ConfigSource::Default);

        let (memory, _) = &map["memory_dataset"];
        assert_eq!(memory, "100x100x1");
    }
}
