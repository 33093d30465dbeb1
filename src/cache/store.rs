//! Save and restore of cached dependency directories
//!
//! One build runs `restore()` before installing dependencies and `save()`
//! after. Save replaces the cache wholesale; restore moves directories
//! back only when the toolchain signature still matches.

use crate::cache::directories::resolve_directories;
use crate::cache::layout::{CacheLayout, SLUG_DIRECTORIES};
use crate::cache::report::{DirectoryEntry, DirectoryOutcome, RestoreReport, SaveReport};
use crate::cache::signature::{compute_signature, SignatureReport};
use crate::cache::status::{decide_status, CacheStatus, CacheToggle};
use crate::cache::transfer;
use crate::config::schema::ToolchainConfig;
use crate::error::{NodeCacheError, NodeCacheResult};
use crate::runner::CommandRunner;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Node dependency cache for one build/cache directory pair
pub struct CacheStore {
    layout: CacheLayout,
    toggle: CacheToggle,
    toolchain: ToolchainConfig,
    runner: Arc<dyn CommandRunner>,
}

impl CacheStore {
    /// Create a store probing the default `node`/`npm`/`yarn` toolchain
    pub fn new(layout: CacheLayout, toggle: CacheToggle, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            layout,
            toggle,
            toolchain: ToolchainConfig::default(),
            runner,
        }
    }

    /// Probe different toolchain programs for the signature
    pub fn with_toolchain(mut self, toolchain: ToolchainConfig) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Compute the signature of the active toolchain
    pub async fn signature(&self) -> SignatureReport {
        compute_signature(self.runner.as_ref(), &self.toolchain).await
    }

    /// Check the persisted cache against the active toolchain
    pub async fn status(&self) -> NodeCacheResult<CacheStatus> {
        if self.toggle.is_disabled() {
            return Ok(CacheStatus::Disabled);
        }
        let report = self.signature().await;
        decide_status(&self.layout, self.toggle, &report.signature).await
    }

    /// Replace the cache with the current dependency directories
    ///
    /// Clearing the old cache, writing the signature, and slug reduction
    /// are fatal on failure. Directory copies are best-effort and only
    /// produce warnings.
    pub async fn save(&self) -> NodeCacheResult<SaveReport> {
        let mut report = SaveReport::begin();

        info!("Clearing previous node cache");
        let cache_root = self.layout.cache_root();
        transfer::remove_path(cache_root.clone())
            .await
            .map_err(|e| NodeCacheError::CacheClear {
                path: cache_root,
                source: e,
            })?;

        if self.toggle.is_disabled() {
            info!("Skipping cache save ({})", CacheStatus::Disabled);
            report.skipped = Some(CacheStatus::Disabled);
        } else {
            let signature = self.signature().await;
            self.write_signature(&signature).await?;
            report.signature = Some(signature.signature);
            report.degraded_probes = signature.degraded;

            self.copy_directories(&mut report).await;
        }

        report.slug_removed = self.remove_from_slug().await?;
        report.finished_at = Utc::now();
        Ok(report)
    }

    async fn write_signature(&self, signature: &SignatureReport) -> NodeCacheResult<()> {
        let cache_root = self.layout.cache_root();
        tokio::fs::create_dir_all(&cache_root)
            .await
            .map_err(|e| NodeCacheError::SignatureWrite {
                path: cache_root,
                source: e,
            })?;

        let path = self.layout.signature_path();
        tokio::fs::write(&path, signature.signature.as_bytes())
            .await
            .map_err(|e| NodeCacheError::SignatureWrite { path, source: e })
    }

    async fn copy_directories(&self, report: &mut SaveReport) {
        let resolved = resolve_directories(self.layout.build_dir()).await;
        let set = resolved.into_value();
        info!("Saving {} cacheDirectories ({}):", set.len(), set.source);
        report.source = Some(set.source);

        for dir in set.paths {
            let src = self.layout.build_path(&dir);
            let (outcome, warnings) = if transfer::exists(&src).await {
                let warnings = transfer::copy_tree(src, self.layout.cached_path(&dir)).await;
                (DirectoryOutcome::Cached, warnings)
            } else {
                (DirectoryOutcome::NothingToCache, Vec::new())
            };

            info!("- {}{}", dir, outcome.log_suffix());
            for w in &warnings {
                warn!("  could not cache {}: {}", w.path.display(), w.reason);
            }
            report.directories.push(DirectoryEntry {
                dir,
                outcome,
                warnings,
            });
        }
    }

    /// Move cached directories back into the build directory
    ///
    /// Never fails. Anything other than a valid cache is logged and
    /// skipped; directories that cannot be moved become warnings.
    pub async fn restore(&self) -> RestoreReport {
        let started_at = Utc::now();
        let mut report = RestoreReport {
            started_at,
            finished_at: started_at,
            status: CacheStatus::Disabled,
            signature: None,
            degraded_probes: Vec::new(),
            source: None,
            directories: Vec::new(),
        };

        let status = if self.toggle.is_disabled() {
            CacheStatus::Disabled
        } else {
            let signature = self.signature().await;
            let status = match decide_status(&self.layout, self.toggle, &signature.signature).await
            {
                Ok(status) => status,
                Err(e) => {
                    warn!("{}", e);
                    CacheStatus::Stale
                }
            };
            report.signature = Some(signature.signature);
            report.degraded_probes = signature.degraded;
            status
        };
        report.status = status;

        if status.is_valid() {
            self.move_directories(&mut report).await;
        } else {
            info!("Skipping cache restore ({})", status);
        }

        report.finished_at = Utc::now();
        report
    }

    async fn move_directories(&self, report: &mut RestoreReport) {
        let set = resolve_directories(self.layout.build_dir()).await.into_value();
        info!("Loading {} from cacheDirectories ({}):", set.len(), set.source);
        report.source = Some(set.source);

        for dir in set.paths {
            let dst = self.layout.build_path(&dir);
            let cached = self.layout.cached_path(&dir);

            let (outcome, warnings) = if transfer::exists(&dst).await {
                (DirectoryOutcome::Exists, Vec::new())
            } else if transfer::exists(&cached).await {
                (DirectoryOutcome::Restored, transfer::move_tree(cached, dst).await)
            } else {
                (DirectoryOutcome::NotCached, Vec::new())
            };

            info!("- {}{}", dir, outcome.log_suffix());
            for w in &warnings {
                warn!("  could not restore {}: {}", w.path.display(), w.reason);
            }
            report.directories.push(DirectoryEntry {
                dir,
                outcome,
                warnings,
            });
        }
    }

    /// Directories of the resolved set that are currently in the cache
    pub async fn cached_directories(&self) -> Vec<String> {
        let set = resolve_directories(self.layout.build_dir()).await.into_value();
        let mut cached = Vec::new();
        for dir in set.paths {
            if transfer::exists(&self.layout.cached_path(&dir)).await {
                cached.push(dir);
            }
        }
        cached
    }

    /// Remove heavy package-manager caches from the build output
    pub async fn remove_from_slug(&self) -> NodeCacheResult<Vec<String>> {
        remove_from_slug(self.layout.build_dir()).await
    }
}

/// Remove `.npm` and `.cache/yarn` from a build directory
///
/// Returns the directories that existed and were removed. Any failure is
/// fatal: the build output would otherwise ship the caches.
pub async fn remove_from_slug(build_dir: &Path) -> NodeCacheResult<Vec<String>> {
    let mut removed = Vec::new();

    for dir in SLUG_DIRECTORIES {
        let path = build_dir.join(dir);
        let existed = transfer::exists(&path).await;
        transfer::remove_path(path.clone())
            .await
            .map_err(|e| NodeCacheError::SlugReduction { path, source: e })?;
        if existed {
            removed.push(dir.to_string());
        }
    }

    Ok(removed)
}
