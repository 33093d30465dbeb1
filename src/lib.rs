//! nodecache - Node.js dependency cache for build pipelines
//!
//! Restores package-manager caches before dependencies are installed and
//! saves them afterwards, invalidating whenever the node/npm/yarn versions
//! change.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

pub use error::{NodeCacheError, NodeCacheResult};
