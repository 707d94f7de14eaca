//! Runtime configuration for the BookmarkHub service.
//!
//! Resolution order: built-in defaults, then `config.json` in the platform
//! config directory (or an explicit path), then environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::platform;
use crate::types::errors::ConfigError;

pub const ENV_DATA_DIR: &str = "BOOKMARKHUB_DATA_DIR";
pub const ENV_STORE: &str = "BOOKMARKHUB_STORE";
pub const ENV_LOG: &str = "BOOKMARKHUB_LOG";

pub const DATABASE_FILE: &str = "bookmarkhub.db";

/// Which key-value store backs the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub backend: StoreBackend,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Maximum RPC requests accepted per second.
    pub rate_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::get_data_dir(),
            backend: StoreBackend::Sqlite,
            log_filter: "bookmarkhub=info".to_string(),
            rate_limit: 200,
        }
    }
}

impl AppConfig {
    /// Loads `config.json` from the platform config directory and applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = platform::get_config_dir().join("config.json");
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a config file. A missing file yields the defaults; a malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Overrides fields from environment-style lookups.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(ENV_STORE) {
            self.backend = backend.parse()?;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}
