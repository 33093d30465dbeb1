//! nodecache - Node.js dependency cache for build pipelines
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use nodecache::cache::CacheToggle;
use nodecache::cli::commands::{self, CommandContext};
use nodecache::cli::{Cli, Commands};
use nodecache::config::{Config, ConfigManager};
use nodecache::error::NodeCacheResult;
use nodecache::runner::SystemRunner;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn load_config(cli: &Cli) -> NodeCacheResult<Config> {
    match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()).load_required().await,
        None => ConfigManager::new().load().await,
    }
}

/// Logs go to stderr so `--format json` output stays machine-readable.
/// The cache's info lines are the build log, so info is the default level.
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("nodecache=info"),
        1 => EnvFilter::new("nodecache=debug"),
        _ => EnvFilter::new("nodecache=trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> NodeCacheResult<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).await?;
    init_logging(cli.verbose, &config);

    let toggle = CacheToggle::resolve(cli.node_modules_cache.as_deref(), config.cache.enabled);
    debug!("Cache toggle: {:?}", toggle);

    let ctx = CommandContext::new(config, toggle, Arc::new(SystemRunner::new()));

    match cli.command {
        Commands::Restore(args) => commands::restore(args, &ctx).await,
        Commands::Save(args) => commands::save(args, &ctx).await,
        Commands::Status(args) => commands::status(args, &ctx).await,
        Commands::Signature(args) => commands::signature(args, &ctx).await,
        Commands::Dirs(args) => commands::dirs(args).await,
        Commands::Slug(args) => commands::slug(args).await,
    }
}
