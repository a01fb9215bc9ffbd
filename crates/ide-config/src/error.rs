//! Error types for ide-config

use std::path::PathBuf;

/// Result type for ide-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading the configuration document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration references environment variable {name}, but it is not set")]
    MissingEnvironmentVariable { name: String },

    #[error("Required configuration section '{key}' is missing")]
    MissingSection { key: String },

    #[error("Unknown configuration section '{key}'")]
    UnknownSection { key: String },

    #[error("Configuration section '{key}' must be {expected}, found {found}")]
    InvalidSectionType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
