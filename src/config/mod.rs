//! # Service Configuration
//!
//! A single JSON file; every field is optional and falls back to the
//! default below.
//!
//! ```json
//! {
//!   "database_url": "sqlite://superheroes.db",
//!   "max_connections": 5,
//!   "log_level": "info",
//!   "log_format": "text",
//!   "reject_duplicate_names": false,
//!   "server": { "host": "0.0.0.0", "port": 5555, "cors_origins": [], "request_timeout_secs": 30 }
//! }
//! ```

mod errors;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::store::NamePolicy;

pub use errors::{ConfigError, ConfigResult};

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// sqlx connection URL of the SQLite database
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Default tracing filter; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `text` or `json`
    #[serde(default)]
    pub log_format: LogFormat,

    /// Refuse to create a hero or power whose name is already taken
    #[serde(default)]
    pub reject_duplicate_names: bool,

    #[serde(default)]
    pub server: HttpServerConfig,
}

fn default_database_url() -> String {
    "sqlite://superheroes.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            reject_duplicate_names: false,
            server: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Also run after command-line overrides.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must not be empty".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::Invalid("max_connections must be > 0".to_string()));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn name_policy(&self) -> NamePolicy {
        NamePolicy::from_flag(self.reject_duplicate_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_url, "sqlite://superheroes.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.name_policy(), NamePolicy::AllowDuplicates);
        assert_eq!(config.server.port, 5555);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_empty_object() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_overrides() {
        let file = write_config(
            r#"{"reject_duplicate_names": true, "log_format": "json", "server": {"port": 8080, "cors_origins": ["http://localhost:3000"]}}"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.name_policy(), NamePolicy::RejectDuplicates);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins.len(), 1);
        assert_eq!(config.server.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_rejects_zero_port() {
        let file = write_config(r#"{"server": {"port": 0}}"#);
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let file = write_config("{ not json");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/superheroes.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = Config::default();
        config.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database_url = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
