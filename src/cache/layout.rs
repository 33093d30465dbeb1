//! On-disk layout of the persisted cache
//!
//! ```text
//! <cache_dir>/node/signature
//! <cache_dir>/node/<dir>     mirrors <build_dir>/<dir>
//! ```

use std::path::{Path, PathBuf};

/// Sub-directory of the cache location owned by this cache
pub const CACHE_SUBDIR: &str = "node";

/// File holding the signature the cache was saved under
pub const SIGNATURE_FILE: &str = "signature";

/// Heavy directories removed from the build output after saving
pub const SLUG_DIRECTORIES: [&str; 2] = [".npm", ".cache/yarn"];

/// Resolved paths for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    build_dir: PathBuf,
    cache_dir: PathBuf,
}

impl CacheLayout {
    pub fn new(build_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Root of everything this cache persists
    pub fn cache_root(&self) -> PathBuf {
        self.cache_dir.join(CACHE_SUBDIR)
    }

    pub fn signature_path(&self) -> PathBuf {
        self.cache_root().join(SIGNATURE_FILE)
    }

    /// Location of a cache directory inside the build output
    pub fn build_path(&self, dir: &str) -> PathBuf {
        self.build_dir.join(dir)
    }

    /// Location of a cache directory inside the persisted cache
    pub fn cached_path(&self, dir: &str) -> PathBuf {
        self.cache_root().join(dir)
    }
}
