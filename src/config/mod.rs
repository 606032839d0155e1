//! Configuration management
//!
//! This module handles loading and parsing configuration for Clubroom.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database driver (sqlite or mysql)
    #[serde(default)]
    pub driver: DatabaseDriver,
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/clubroom.db".to_string()
}

/// Database driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    /// SQLite (default)
    #[default]
    Sqlite,
    /// MySQL
    Mysql,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_session_ttl(),
        }
    }
}

fn default_session_ttl() -> u64 {
    3600
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// `CLUBROOM_DATABASE_HOST` / `_USER` / `_PASSWORD` / `_NAME` assemble a
    /// MySQL connection URL and switch the driver, for deployments that hand
    /// out credentials as separate variables.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CLUBROOM_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("CLUBROOM_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        if let Ok(driver) = std::env::var("CLUBROOM_DATABASE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "sqlite" => self.database.driver = DatabaseDriver::Sqlite,
                "mysql" => self.database.driver = DatabaseDriver::Mysql,
                other => tracing::warn!("Unknown database driver '{}', keeping current", other),
            }
        }
        if let Ok(url) = std::env::var("CLUBROOM_DATABASE_URL") {
            self.database.url = url;
        }

        // Separate credential variables take precedence over the URL
        if let Ok(host) = std::env::var("CLUBROOM_DATABASE_HOST") {
            let user = std::env::var("CLUBROOM_DATABASE_USER").unwrap_or_default();
            let password = std::env::var("CLUBROOM_DATABASE_PASSWORD").unwrap_or_default();
            let name = std::env::var("CLUBROOM_DATABASE_NAME").unwrap_or_default();
            self.database.driver = DatabaseDriver::Mysql;
            self.database.url = format!("mysql://{}:{}@{}/{}", user, password, host, name);
        }

        if let Ok(ttl) = std::env::var("CLUBROOM_SESSION_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse() {
                self.session.ttl_seconds = ttl;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.session.ttl_seconds, 3600);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Path::new("does-not-exist.yml")).expect("load should succeed");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 8080
database:
  driver: sqlite
  url: ":memory:"
session:
  ttl_seconds: 60
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("parse should succeed");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, ":memory:");
        assert_eq!(config.session.ttl_seconds, 60);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "server:\n  port: 4000\n";
        let config: Config = serde_yaml::from_str(yaml).expect("parse should succeed");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
    }
}
