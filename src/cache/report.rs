//! Structured results of save and restore
//!
//! Everything here is also logged as it happens; reports exist so callers
//! (and `--format json`) can inspect the outcome without scraping logs.

use crate::cache::directories::DirectorySource;
use crate::cache::signature::{ProbeFailure, Signature};
use crate::cache::status::CacheStatus;
use crate::cache::transfer::TransferWarning;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened to one cache directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryOutcome {
    /// Copied from the build directory into the cache
    Cached,
    /// Absent from the build directory during save
    NothingToCache,
    /// Moved from the cache back into the build directory
    Restored,
    /// Already present in the build directory during restore
    Exists,
    /// Absent from both build directory and cache during restore
    NotCached,
}

impl DirectoryOutcome {
    /// Suffix used in the build log after the directory name
    pub fn log_suffix(&self) -> &'static str {
        match self {
            Self::Cached | Self::Restored => "",
            Self::NothingToCache => " (nothing to cache)",
            Self::Exists => " (exists - skipping)",
            Self::NotCached => " (not cached - skipping)",
        }
    }
}

/// Outcome for a single directory
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    pub dir: String,
    pub outcome: DirectoryOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TransferWarning>,
}

/// Result of [`CacheStore::save`](crate::cache::CacheStore::save)
#[derive(Debug, Clone, Serialize)]
pub struct SaveReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Set when saving was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<CacheStatus>,
    /// Signature written to the cache, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded_probes: Vec<ProbeFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DirectorySource>,
    pub directories: Vec<DirectoryEntry>,
    /// Slug directories that existed and were removed
    pub slug_removed: Vec<String>,
}

impl SaveReport {
    pub(crate) fn begin() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            skipped: None,
            signature: None,
            degraded_probes: Vec::new(),
            source: None,
            directories: Vec::new(),
            slug_removed: Vec::new(),
        }
    }

    pub fn count(&self, outcome: DirectoryOutcome) -> usize {
        self.directories.iter().filter(|d| d.outcome == outcome).count()
    }

    pub fn warning_count(&self) -> usize {
        self.directories.iter().map(|d| d.warnings.len()).sum()
    }
}

/// Result of [`CacheStore::restore`](crate::cache::CacheStore::restore)
#[derive(Debug, Clone, Serialize)]
pub struct RestoreReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: CacheStatus,
    /// Signature compared against the cache; absent when disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded_probes: Vec<ProbeFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DirectorySource>,
    pub directories: Vec<DirectoryEntry>,
}

impl RestoreReport {
    pub fn count(&self, outcome: DirectoryOutcome) -> usize {
        self.directories.iter().filter(|d| d.outcome == outcome).count()
    }

    pub fn warning_count(&self) -> usize {
        self.directories.iter().map(|d| d.warnings.len()).sum()
    }
}
