//! Dirs command - show the resolved cache directory set

use crate::cache::resolve_directories;
use crate::cli::args::{DirsArgs, OutputFormat};
use crate::cli::commands::{print_json, require_dir};
use crate::error::NodeCacheResult;
use console::style;

/// Execute the dirs command
pub async fn execute(args: DirsArgs) -> NodeCacheResult<()> {
    require_dir(&args.build_dir)?;
    let resolved = resolve_directories(&args.build_dir).await;

    match args.format {
        OutputFormat::Json => print_json(&resolved)?,
        OutputFormat::Text => {
            let spec = &resolved.value;
            println!("{} cacheDirectories ({}):", spec.len(), spec.source);
            for dir in &spec.paths {
                println!("  {} {}", style("•").cyan(), dir);
            }
            if let Some(reason) = &resolved.reason {
                eprintln!("{} {}", style("⚠").yellow(), reason);
            }
        }
    }

    Ok(())
}
