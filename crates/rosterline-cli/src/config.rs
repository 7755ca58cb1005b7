//! Configuration loading from TOML files

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use rosterline_openalex::ApiConfig;
use rosterline_store::DbConfig;

/// Global configuration for rosterline
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub db: DbConfig,
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./rosterline.toml (current directory)
    /// 2. ~/.config/rosterline/config.toml
    ///
    /// If no config file is found, returns defaults (password from
    /// ROSTERLINE_DB_PASSWORD when set).
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("rosterline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "rosterline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.openalex.org");
        assert_eq!(config.db.port, 5432);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[api]
base_url = "http://localhost:9000"
mailto = "me@example.org"
per_page = 25

[db]
host = "db.internal"
port = 5433
database = "faculty"
user = "harvester"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.per_page, 25);
        assert_eq!(config.db.host, "db.internal");
        assert_eq!(config.db.port, 5433);
        assert_eq!(config.db.database, "faculty");
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("[db]\nhost = \"elsewhere\"\n").unwrap();
        assert_eq!(config.db.host, "elsewhere");
        assert_eq!(config.db.port, 5432);
        assert_eq!(config.api.per_page, 50);
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rosterline.toml");
        std::fs::write(&path, "[api]\nper_page = 10\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api.per_page, 10);
    }

    #[test]
    fn from_file_missing_is_an_error() {
        let path = PathBuf::from("/nonexistent/rosterline.toml");
        assert!(Config::from_file(&path).is_err());
    }
}
