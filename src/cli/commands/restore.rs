//! Restore command - bring cached dependencies back before a build

use crate::cache::DirectoryOutcome;
use crate::cli::args::{CacheArgs, OutputFormat};
use crate::cli::commands::{print_json, CommandContext};
use crate::error::NodeCacheResult;
use console::style;

/// Execute the restore command
///
/// Restoring is advisory: only an invalid build directory fails it.
pub async fn execute(args: CacheArgs, ctx: &CommandContext) -> NodeCacheResult<()> {
    let store = ctx.store(&args)?;
    let report = store.restore().await;

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text if report.status.is_valid() => {
            println!(
                "{} restored {} of {} directories",
                style("✓").green(),
                report.count(DirectoryOutcome::Restored),
                report.directories.len()
            );
            let warnings = report.warning_count();
            if warnings > 0 {
                println!(
                    "{} {} entries could not be restored",
                    style("⚠").yellow(),
                    warnings
                );
            }
        }
        OutputFormat::Text => {
            println!("{} cache restore skipped ({})", style("-").dim(), report.status);
        }
    }

    Ok(())
}
