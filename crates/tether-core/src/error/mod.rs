//! Error types and result aliases for tether operations.
//!
//! Graph anomalies (missing dependencies, version mismatches, cycles) are
//! never errors; they are classified into the resolution report. This type
//! covers the I/O and configuration boundary around the resolver.

use thiserror::Error;

/// Unified error type for all tether operations
#[derive(Error, Debug)]
pub enum TetherError {
    // Input errors
    #[error("Failed to parse {file}: {message}")]
    JsonParse { file: String, message: String },

    #[error("Failed to parse tether.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for tether operations
pub type TetherResult<T> = Result<T, TetherError>;

impl TetherError {
    /// Create an IO error from std::io::Error
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON parse error for a named file
    pub fn json(file: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::JsonParse {
            file: file.into(),
            message: source.to_string(),
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            TetherError::JsonParse { .. } => {
                Some("Check that the registry file is valid JSON, or reinstall the affected plugin")
            },
            TetherError::TomlParse { .. } | TetherError::ConfigValidation { .. } => {
                Some("Check ~/.tether/config.toml (or the --config file), TETHER_* variables and flags")
            },
            TetherError::Io { .. } => Some("Check that the plugins directory exists and is readable"),
        }
    }
}
