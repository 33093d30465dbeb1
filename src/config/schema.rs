//! Configuration schema for nodecache
//!
//! Configuration is stored at `~/.config/nodecache/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Cache settings
    pub cache: CacheConfig,

    /// Programs probed for the cache signature
    pub toolchain: ToolchainConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable dependency caching (default: true).
    /// An explicit NODE_MODULES_CACHE value takes precedence.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Toolchain programs whose versions make up the cache signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// JavaScript runtime
    pub runtime: String,

    /// Primary package manager
    pub package_manager: String,

    /// Secondary package manager
    pub alt_package_manager: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            runtime: "node".to_string(),
            package_manager: "npm".to_string(),
            alt_package_manager: "yarn".to_string(),
        }
    }
}

impl ToolchainConfig {
    /// Programs in signature order: runtime, primary, secondary
    pub fn programs(&self) -> [&str; 3] {
        [
            self.runtime.as_str(),
            self.package_manager.as_str(),
            self.alt_package_manager.as_str(),
        ]
    }
}
