//! Cache directory resolution
//!
//! The directories worth caching come from `package.json`:
//! 1. `cacheDirectories`
//! 2. `cache_directories` (legacy spelling)
//! 3. Built-in defaults: `.npm`, `.cache/yarn`, `bower_components`
//!
//! A missing or unparsable `package.json` behaves like one with neither key,
//! and a key that is not an array of strings behaves like it is absent.

use crate::cache::degraded::Degraded;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Component, Path};
use tracing::{debug, warn};

/// Directories cached when the project does not say otherwise
pub const DEFAULT_DIRECTORIES: [&str; 3] = [".npm", ".cache/yarn", "bower_components"];

/// Project manifest read from the build directory
pub const PACKAGE_JSON: &str = "package.json";

/// Where the directory list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirectorySource {
    #[serde(rename = "package.json")]
    PackageJson,
    #[serde(rename = "default")]
    Default,
}

impl fmt::Display for DirectorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageJson => write!(f, "package.json"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Ordered, non-empty set of build-relative directories to cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySpec {
    pub paths: Vec<String>,
    pub source: DirectorySource,
}

impl DirectorySpec {
    /// The built-in default set
    pub fn defaults() -> Self {
        Self {
            paths: DEFAULT_DIRECTORIES.iter().map(|d| d.to_string()).collect(),
            source: DirectorySource::Default,
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// The two `package.json` keys that can override the defaults
///
/// Kept as raw JSON so a wrongly typed key only disqualifies itself.
#[derive(Debug, Default, Deserialize)]
struct CacheDirectoriesManifest {
    #[serde(rename = "cacheDirectories", default)]
    primary: Option<Value>,

    #[serde(rename = "cache_directories", default)]
    legacy: Option<Value>,
}

/// Entries of a key that must be an array of strings
///
/// Any other type counts as absent; non-string elements are skipped.
fn string_entries(key: &str, value: Option<Value>, notes: &mut Vec<String>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(entry) => Some(entry),
                other => {
                    warn!("Ignoring non-string {} entry: {}", key, other);
                    notes.push(format!("{}: skipped non-string entry {}", key, other));
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!("Ignoring {}: expected an array of strings, found {}", key, other);
            notes.push(format!("{}: expected an array of strings", key));
            Vec::new()
        }
    }
}

/// Whether a configured entry stays inside the build directory
fn is_contained(entry: &str) -> bool {
    let path = Path::new(entry);
    !entry.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}

/// Drop entries that would reach outside the build directory
fn contained_entries(key: &str, entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| {
            let keep = is_contained(entry);
            if !keep {
                warn!("Ignoring {} entry '{}': must be a relative path inside the app", key, entry);
            }
            keep
        })
        .collect()
}

/// Pick the directory set from parsed manifest keys
fn select(manifest: CacheDirectoriesManifest, notes: &mut Vec<String>) -> DirectorySpec {
    let primary = string_entries("cacheDirectories", manifest.primary, notes);
    let primary = contained_entries("cacheDirectories", primary);
    if !primary.is_empty() {
        return DirectorySpec {
            paths: primary,
            source: DirectorySource::PackageJson,
        };
    }

    let legacy = string_entries("cache_directories", manifest.legacy, notes);
    let legacy = contained_entries("cache_directories", legacy);
    if !legacy.is_empty() {
        return DirectorySpec {
            paths: legacy,
            source: DirectorySource::PackageJson,
        };
    }

    DirectorySpec::defaults()
}

/// Resolve the directories to cache for a build directory
///
/// Never fails. A `package.json` that cannot be read or parsed falls back
/// to the defaults and the reason is carried in the result.
pub async fn resolve_directories(build_dir: &Path) -> Degraded<DirectorySpec> {
    let manifest_path = build_dir.join(PACKAGE_JSON);

    let content = match tokio::fs::read_to_string(&manifest_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No {} in {}, using default cache directories", PACKAGE_JSON, build_dir.display());
            return Degraded::ok(DirectorySpec::defaults());
        }
        Err(e) => {
            let reason = format!("reading {}: {}", manifest_path.display(), e);
            warn!("Unable to read {}, using default cache directories: {}", PACKAGE_JSON, e);
            return Degraded::fallback(DirectorySpec::defaults(), reason);
        }
    };

    match serde_json::from_str::<CacheDirectoriesManifest>(&content) {
        Ok(manifest) => {
            let mut notes = Vec::new();
            let spec = select(manifest, &mut notes);
            if notes.is_empty() {
                Degraded::ok(spec)
            } else {
                Degraded::fallback(spec, format!("{}: {}", manifest_path.display(), notes.join("; ")))
            }
        }
        Err(e) => {
            let reason = format!("parsing {}: {}", manifest_path.display(), e);
            warn!("Unable to parse {}, using default cache directories: {}", PACKAGE_JSON, e);
            Degraded::fallback(DirectorySpec::defaults(), reason)
        }
    }
}
