//! Slug command - strip package-manager caches from the build output

use crate::cache::remove_from_slug;
use crate::cli::args::SlugArgs;
use crate::cli::commands::require_dir;
use crate::error::NodeCacheResult;
use console::style;

/// Execute the slug command
pub async fn execute(args: SlugArgs) -> NodeCacheResult<()> {
    require_dir(&args.build_dir)?;
    let removed = remove_from_slug(&args.build_dir).await?;

    if removed.is_empty() {
        println!("Nothing to remove.");
    } else {
        for dir in &removed {
            println!("{} removed {}", style("✓").green(), dir);
        }
    }

    Ok(())
}
