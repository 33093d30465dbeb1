//! Toolchain-keyed dependency cache
//!
//! Persists package-manager caches and installed dependencies between
//! builds. A cache is only trusted when the toolchain that produced it is
//! identical to the one about to use it.
//!
//! # Cache States
//!
//! | Status | Restore | Description |
//! |--------|---------|-------------|
//! | Disabled | skip | `NODE_MODULES_CACHE=false` or `cache.enabled = false` |
//! | Stale | skip | No signature, or saved under another toolchain |
//! | Valid | move | Signature matches the active toolchain |
//!
//! Save always clears the old cache first, so a disabled or interrupted
//! build never leaves a cache that a later build could mistake for valid.

pub mod degraded;
pub mod directories;
pub mod layout;
pub mod report;
pub mod signature;
pub mod status;
pub mod store;
pub mod transfer;

pub use degraded::Degraded;
pub use directories::{resolve_directories, DirectorySource, DirectorySpec, DEFAULT_DIRECTORIES};
pub use layout::{CacheLayout, SLUG_DIRECTORIES};
pub use report::{DirectoryEntry, DirectoryOutcome, RestoreReport, SaveReport};
pub use signature::{compute_signature, ProbeFailure, Signature, SignatureReport};
pub use status::{decide_status, CacheStatus, CacheToggle, TOGGLE_ENV};
pub use store::{remove_from_slug, CacheStore};
pub use transfer::TransferWarning;
