use console::style;
use gdalprobe_core::{ProbeError, StrictFailure};
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a binding that cannot be loaded
pub fn binding_unavailable(reason: &str) -> CliError {
    CliError::new("GDAL binding unavailable")
        .with_context(format!(
            "The GDAL native binding could not be loaded. No checks were run.\n\nReason: {}",
            reason
        ))
        .with_suggestion("Build with the binding: cargo build --features gdal")
        .with_suggestion("Install GDAL development files: brew install gdal (macOS)")
        .with_suggestion("Or: apt-get install libgdal-dev (Ubuntu)")
        .with_suggestion("Point the build at a custom install: export GDAL_HOME=/opt/gdal")
        .with_help("Run: gdalprobe --help")
}

/// Create error for a failed library call
pub fn library_failure(operation: &str, message: &str) -> CliError {
    CliError::new("GDAL call failed")
        .with_context(format!(
            "The checklist stopped at: {}\n\nError: {}",
            operation, message
        ))
        .with_suggestion("Check that GDAL_DATA points at the GDAL support files")
        .with_suggestion("Re-run with -v for debug logs")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check gdalprobe.toml for syntax errors")
        .with_suggestion("Check GDALPROBE_* environment variables")
        .with_help("Run: gdalprobe config")
}

/// Create error for strict mode findings
pub fn strict_check_failed(failure: &StrictFailure) -> CliError {
    let mut err = CliError::new("Strict check failed").with_context(failure.to_string());
    if !failure.missing_drivers.is_empty() {
        err = err
            .with_suggestion(format!(
                "Install a GDAL build with these drivers: {}",
                failure.missing_drivers.join(", ")
            ))
            .with_suggestion("Or set GDAL_DRIVER_PATH to the plugin directory");
    }
    if !failure.memory_dataset_ok {
        err = err.with_suggestion("Check that the MEM driver is enabled in your GDAL build");
    }
    err.with_help("Run: gdalprobe check --help")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: &anyhow::Error) -> CliError {
    match error.downcast_ref::<ProbeError>() {
        Some(ProbeError::BindingUnavailable { reason }) => binding_unavailable(reason),
        Some(ProbeError::Library { operation, message }) => library_failure(operation, message),
        Some(ProbeError::ConfigInvalid { key, reason }) => invalid_config(key, reason),
        _ => {
            let message = error.to_string();
            if message.contains("permission denied") {
                CliError::new("Permission denied")
                    .with_context(format!("Error: {}", message))
                    .with_suggestion("Check file permissions")
            } else {
                CliError::new(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_unavailable_maps_to_suggestions() {
        let err = anyhow::Error::new(ProbeError::BindingUnavailable {
            reason: "not linked".to_string(),
        });
        let cli_err = from_anyhow(&err);

        assert_eq!(cli_err.message, "GDAL binding unavailable");
        assert!(cli_err.context.as_deref().unwrap_or_default().contains("not linked"));
        assert!(!cli_err.suggestions.is_empty());
    }

    #[test]
    fn test_config_error_maps_to_invalid_config() {
        let err = anyhow::Error::new(ProbeError::ConfigInvalid {
            key: "memory_width".to_string(),
            reason: "must be at least 1".to_string(),
        });
        assert_eq!(from_anyhow(&err).message, "Invalid configuration: memory_width");
    }

    #[test]
    fn test_unknown_error_keeps_message() {
        let err = anyhow::anyhow!("something odd");
        assert_eq!(from_anyhow(&err).message, "something odd");
    }

    #[test]
    fn test_strict_failure_lists_missing_drivers() {
        let err = strict_check_failed(&StrictFailure {
            missing_drivers: vec!["HDF4".to_string(), "HDF5".to_string()],
            memory_dataset_ok: true,
        });
        assert!(err.suggestions[0].contains("HDF4, HDF5"));
        assert_eq!(err.suggestions.len(), 2);
        assert_eq!(
            err.context.as_deref(),
            Some("Strict check failed: missing drivers [HDF4, HDF5]")
        );
    }
}
