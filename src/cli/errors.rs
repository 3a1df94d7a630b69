//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::observability::ObservabilityError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Logging could not be set up
    LoggingError,
    /// Database open, schema or seed failure
    StoreError,
    /// Socket or runtime failure while serving
    ServeError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SUPERHEROES_CLI_CONFIG_ERROR",
            Self::LoggingError => "SUPERHEROES_CLI_LOGGING_ERROR",
            Self::StoreError => "SUPERHEROES_CLI_STORE_ERROR",
            Self::ServeError => "SUPERHEROES_CLI_SERVE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {0}", CliErrorCode::ConfigError.code())]
    Config(#[from] ConfigError),

    #[error("{}: {0}", CliErrorCode::LoggingError.code())]
    Logging(#[from] ObservabilityError),

    #[error("{}: {0}", CliErrorCode::StoreError.code())]
    Store(#[from] StoreError),

    #[error("{}: {0}", CliErrorCode::ServeError.code())]
    Serve(#[from] io::Error),
}

impl CliError {
    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        match self {
            CliError::Config(_) => CliErrorCode::ConfigError,
            CliError::Logging(_) => CliErrorCode::LoggingError,
            CliError::Store(_) => CliErrorCode::StoreError,
            CliError::Serve(_) => CliErrorCode::ServeError,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
