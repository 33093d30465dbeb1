//! Signature command - show the toolchain identity used to key the cache

use crate::cache::compute_signature;
use crate::cli::args::{OutputFormat, SignatureArgs};
use crate::cli::commands::{print_json, CommandContext};
use crate::error::NodeCacheResult;
use console::style;

/// Execute the signature command
pub async fn execute(args: SignatureArgs, ctx: &CommandContext) -> NodeCacheResult<()> {
    let report = compute_signature(ctx.runner.as_ref(), &ctx.config.toolchain).await;

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{}", report.signature);
            for probe in &report.degraded {
                eprintln!(
                    "{} {} version unavailable: {}",
                    style("⚠").yellow(),
                    probe.program,
                    probe.reason
                );
            }
        }
    }

    Ok(())
}
