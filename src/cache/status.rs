//! Cache validity decision
//!
//! | Status | Reason | When |
//! |--------|--------|------|
//! | Disabled | disabled by config | toggle is off |
//! | Stale | new runtime signature | stored signature missing or different |
//! | Valid | | stored signature equals the current one |

use crate::cache::layout::CacheLayout;
use crate::cache::signature::Signature;
use crate::error::{NodeCacheError, NodeCacheResult};
use serde::Serialize;
use std::fmt;
use std::io::ErrorKind;
use tracing::debug;

/// Environment variable the CLI reads the toggle from
pub const TOGGLE_ENV: &str = "NODE_MODULES_CACHE";

/// Whether caching is switched on for this build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheToggle {
    #[default]
    Enabled,
    Disabled,
}

impl CacheToggle {
    /// Interpret a raw toggle value; only the literal `"false"` disables
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("false") => Self::Disabled,
            _ => Self::Enabled,
        }
    }

    /// An explicit toggle value wins; otherwise the config setting applies
    pub fn resolve(explicit: Option<&str>, config_enabled: bool) -> Self {
        match explicit {
            Some(_) => Self::from_value(explicit),
            None if config_enabled => Self::Enabled,
            None => Self::Disabled,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// Outcome of checking the persisted cache against the current build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Disabled,
    Stale,
    Valid,
}

impl CacheStatus {
    /// Human-readable reason, as printed in the build log
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled by config",
            Self::Stale => "new runtime signature",
            Self::Valid => "valid",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Read the signature the cache was saved under, if there is one
pub async fn read_stored_signature(layout: &CacheLayout) -> NodeCacheResult<Option<Vec<u8>>> {
    let path = layout.signature_path();
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(NodeCacheError::SignatureRead { path, source: e }),
    }
}

/// Decide whether the persisted cache may be restored
///
/// The toggle is checked first, so a disabled cache never touches disk.
/// A signature that exists but cannot be read is an error; the caller
/// decides whether that is fatal.
pub async fn decide_status(
    layout: &CacheLayout,
    toggle: CacheToggle,
    current: &Signature,
) -> NodeCacheResult<CacheStatus> {
    if toggle.is_disabled() {
        return Ok(CacheStatus::Disabled);
    }

    let status = match read_stored_signature(layout).await? {
        Some(stored) if stored == current.as_bytes() => CacheStatus::Valid,
        Some(_) => CacheStatus::Stale,
        None => {
            debug!("No stored signature at {}", layout.signature_path().display());
            CacheStatus::Stale
        }
    };

    Ok(status)
}
