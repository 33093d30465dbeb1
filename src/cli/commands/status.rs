//! Status command - report whether the cache would be restored

use crate::cache::CacheStatus;
use crate::cli::args::{CacheArgs, OutputFormat};
use crate::cli::commands::{print_json, CommandContext};
use crate::error::NodeCacheResult;
use console::style;
use serde::Serialize;

#[derive(Serialize)]
struct StatusJson {
    status: CacheStatus,
    reason: &'static str,
    cached: Vec<String>,
}

/// Execute the status command
pub async fn execute(args: CacheArgs, ctx: &CommandContext) -> NodeCacheResult<()> {
    let store = ctx.store(&args)?;
    let status = store.status().await?;
    let cached = store.cached_directories().await;

    match args.format {
        OutputFormat::Json => print_json(&StatusJson {
            status,
            reason: status.reason(),
            cached,
        })?,
        OutputFormat::Text => {
            let label = match status {
                CacheStatus::Valid => style("valid").green(),
                CacheStatus::Stale => style("stale").yellow(),
                CacheStatus::Disabled => style("disabled").dim(),
            };
            println!("Cache: {} ({})", label, status.reason());
            if cached.is_empty() {
                println!("No cached directories.");
            } else {
                println!("Cached directories:");
                for dir in &cached {
                    println!("  {} {}", style("•").cyan(), dir);
                }
            }
        }
    }

    Ok(())
}
