//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or validating a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value parsed but is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Config result type
pub type ConfigResult<T> = Result<T, ConfigError>;
