//! Error types for gdalprobe

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    // Binding errors
    #[error("GDAL binding unavailable: {reason}")]
    BindingUnavailable { reason: String },

    // Library call errors
    #[error("GDAL call failed during {operation}: {message}")]
    Library { operation: String, message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Wrap a failed library call with the operation that triggered it
    pub fn library(operation: impl Into<String>, message: impl ToString) -> Self {
        ProbeError::Library {
            operation: operation.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
