//! Configuration management for nodecache

pub mod schema;

pub use schema::Config;

use crate::error::{NodeCacheError, NodeCacheResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nodecache")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is missing
    pub async fn load(&self) -> NodeCacheResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> NodeCacheResult<Config> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            NodeCacheError::io(format!("reading config from {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| NodeCacheError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load configuration that was explicitly requested; a missing file is an error
    pub async fn load_required(&self) -> NodeCacheResult<Config> {
        if !self.config_path.exists() {
            return Err(NodeCacheError::ConfigNotFound(self.config_path.clone()));
        }
        self.load_from_file(&self.config_path).await
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
