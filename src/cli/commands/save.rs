//! Save command - replace the cache after dependencies are built

use crate::cache::DirectoryOutcome;
use crate::cli::args::{CacheArgs, OutputFormat};
use crate::cli::commands::{print_json, CommandContext};
use crate::error::NodeCacheResult;
use console::style;

/// Execute the save command
pub async fn execute(args: CacheArgs, ctx: &CommandContext) -> NodeCacheResult<()> {
    let store = ctx.store(&args)?;
    let report = store.save().await?;

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            if let Some(status) = report.skipped {
                println!("{} cache save skipped ({})", style("-").dim(), status);
            } else {
                println!(
                    "{} cached {} of {} directories",
                    style("✓").green(),
                    report.count(DirectoryOutcome::Cached),
                    report.directories.len()
                );
            }
            if !report.slug_removed.is_empty() {
                println!(
                    "{} removed from build output: {}",
                    style("✓").green(),
                    report.slug_removed.join(", ")
                );
            }
            let warnings = report.warning_count();
            if warnings > 0 {
                println!(
                    "{} {} entries could not be cached",
                    style("⚠").yellow(),
                    warnings
                );
            }
        }
    }

    Ok(())
}
