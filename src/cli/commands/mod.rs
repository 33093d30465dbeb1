//! CLI command implementations

pub mod dirs;
pub mod restore;
pub mod save;
pub mod signature;
pub mod slug;
pub mod status;

pub use dirs::execute as dirs;
pub use restore::execute as restore;
pub use save::execute as save;
pub use signature::execute as signature;
pub use slug::execute as slug;
pub use status::execute as status;

use crate::cache::{CacheLayout, CacheStore, CacheToggle};
use crate::cli::args::CacheArgs;
use crate::config::Config;
use crate::error::{NodeCacheError, NodeCacheResult};
use crate::runner::CommandRunner;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub config: Config,
    pub toggle: CacheToggle,
    pub runner: Arc<dyn CommandRunner>,
}

impl CommandContext {
    pub fn new(config: Config, toggle: CacheToggle, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            toggle,
            runner,
        }
    }

    /// Build a cache store for the given directories
    pub fn store(&self, args: &CacheArgs) -> NodeCacheResult<CacheStore> {
        require_dir(&args.build_dir)?;
        let layout = CacheLayout::new(&args.build_dir, &args.cache_dir);
        Ok(CacheStore::new(layout, self.toggle, Arc::clone(&self.runner))
            .with_toolchain(self.config.toolchain.clone()))
    }
}

/// Fail early when the build directory does not exist
pub(crate) fn require_dir(path: &Path) -> NodeCacheResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(NodeCacheError::PathNotFound(path.to_path_buf()))
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> NodeCacheResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
