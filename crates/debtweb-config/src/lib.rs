//! Configuration management for debtweb
//!
//! This module handles loading, validation, and management of
//! debtweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Backend server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Backend origin, e.g. "http://127.0.0.1:5000"
    #[serde(default = "default_url")]
    pub url: String,
    /// Path the dashboard is mounted under on that origin
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Request timeout in seconds (none = no timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            base_path: default_base_path(),
            timeout_secs: None,
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_base_path() -> String {
    "/apps/debt-collection".to_string()
}

/// Dashboard password configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub password: Option<String>,
}

/// Page behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Ask before deleting an entry
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            confirm_delete: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Dashboard password
    #[serde(default)]
    pub auth: AuthConfig,
    /// Page behaviour
    #[serde(default)]
    pub page: PageConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.server.url.to_ascii_lowercase();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "server.url".to_string(),
                reason: "URL must start with http:// or https://".to_string(),
            });
        }

        if !self.server.base_path.is_empty() && !self.server.base_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "server.base_path".to_string(),
                reason: "Base path must be empty or start with '/'".to_string(),
            });
        }

        if self.server.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.server.timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the config path, falling back to defaults when absent
    pub fn load_or_default(path: PathBuf) -> ConfigResult<(Self, bool)> {
        match Self::load(&path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::FileNotFound { .. }) => Ok((Config::default(), false)),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.base_path, "/apps/debt-collection");
        assert_eq!(config.server.url, "http://127.0.0.1:5000");
        assert!(config.server.timeout_secs.is_none());
        assert!(config.auth.password.is_none());
        assert!(config.page.confirm_delete);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_yaml("server:\n  base_path: \"/app\"\n").unwrap();
        assert_eq!(config.server.base_path, "/app");
        assert_eq!(config.server.url, default_url());
        assert!(config.page.confirm_delete);
    }

    #[test]
    fn test_empty_base_path_allowed() {
        let config = Config::from_yaml("server:\n  base_path: \"\"\n").unwrap();
        assert_eq!(config.server.base_path, "");
    }

    #[test]
    fn test_invalid_base_path() {
        let err = Config::from_yaml("server:\n  base_path: \"app\"\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "server.base_path"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_url() {
        let err = Config::from_yaml("server:\n  url: \"ftp://example.com\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_yaml("server:\n  timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let config = Config::from_yaml("server:\n  timeout_secs: 5\n").unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_log_level() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        let (config, found) =
            Config::load_or_default(PathBuf::from("/definitely/not/here.yaml")).unwrap();
        assert!(!found);
        assert_eq!(config.server.base_path, default_base_path());
    }
}
