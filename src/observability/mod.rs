//! # Observability
//!
//! Installs the process-wide `tracing` subscriber. Everything else in the
//! crate only emits events through the `tracing` macros.
//!
//! The filter comes from `RUST_LOG` when it is set, otherwise from the
//! configured level.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, one line per event
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("invalid log level filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds the filter, preferring `RUST_LOG` over `log_level`.
pub fn env_filter(log_level: &str) -> Result<EnvFilter, ObservabilityError> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }

    EnvFilter::try_new(log_level).map_err(|e| ObservabilityError::InvalidFilter {
        filter: log_level.to_string(),
        message: e.to_string(),
    })
}

/// Initialize the tracing subscriber. Call once, from the binary.
pub fn init_tracing(log_level: &str, format: LogFormat) -> Result<(), ObservabilityError> {
    let filter = env_filter(log_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| ObservabilityError::AlreadyInstalled(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        assert_eq!(LogFormat::default().to_string(), "text");
    }

    #[test]
    fn test_env_filter_accepts_directives() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(env_filter("info").is_ok());
        assert!(env_filter("superheroes=debug,tower_http=info").is_ok());
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let err = env_filter("superheroes=loud").unwrap_err();
        assert!(matches!(err, ObservabilityError::InvalidFilter { .. }));
    }
}
