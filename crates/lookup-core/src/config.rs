//! Application configuration management.
//!
//! Configuration is stored at `~/.config/competency-lookup/config.json`.
//! Every field is optional; missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "competency-lookup";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3001/participants";

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV_VAR: &str = "LOOKUP_ENDPOINT";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// Columns removed from every record after fetching
    pub ignored_columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            ignored_columns: vec!["id".to_string()],
        }
    }
}

impl Config {
    /// Load from the default location, then apply the environment override.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_override(std::env::var(ENDPOINT_ENV_VAR).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write to the default location, returning the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Blank values leave the configured endpoint alone.
    pub fn apply_env_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:3001/participants");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.ignored_columns, vec!["id"]);
    }

    #[test]
    fn test_partial_json() {
        let config: Config = serde_json::from_str(r#"{"endpoint": "http://example.test/data"}"#)
            .expect("Failed to parse config test JSON");
        assert_eq!(config.endpoint, "http://example.test/data");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.ignored_columns, vec!["id"]);

        let config: Config = serde_json::from_str(r#"{"ignored_columns": []}"#)
            .expect("Failed to parse config test JSON");
        assert!(config.ignored_columns.is_empty());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env_override(None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        config.apply_env_override(Some("   ".to_string()));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        config.apply_env_override(Some(" http://other:8080/people ".to_string()));
        assert_eq!(config.endpoint, "http://other:8080/people");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/competency-lookup/config.json"))
            .expect("missing config should not be an error");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("lookup-config-{}", std::process::id()))
            .join(CONFIG_FILE);
        let config = Config {
            request_timeout_secs: 5,
            ..Config::default()
        };

        config.save_to(&path).expect("Failed to save test config");
        let loaded = Config::load_from(&path).expect("Failed to load test config");
        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_json() {
        let path = std::env::temp_dir().join(format!("lookup-config-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").expect("Failed to write test config");
        let result = Config::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
    }
}
