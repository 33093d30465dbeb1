//! CLI argument definitions using clap derive

use crate::cache::TOGGLE_ENV;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// nodecache - Node.js dependency cache for build pipelines
///
/// Restores cached node dependencies before a build installs them and saves
/// them afterwards. The cache is discarded whenever the node, npm, or yarn
/// version changes.
#[derive(Parser, Debug)]
#[command(name = "nodecache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "NODECACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache toggle; the literal "false" disables caching
    #[arg(long, global = true, env = TOGGLE_ENV, value_name = "BOOL")]
    pub node_modules_cache: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move cached directories back into the build directory
    Restore(CacheArgs),

    /// Replace the cache with the build's dependency directories
    Save(CacheArgs),

    /// Check whether the cache is valid for the active toolchain
    Status(CacheArgs),

    /// Print the signature of the active toolchain
    Signature(SignatureArgs),

    /// Show which directories would be cached
    Dirs(DirsArgs),

    /// Remove .npm and .cache/yarn from the build directory
    Slug(SlugArgs),
}

/// Build and cache locations shared by cache commands
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Application build directory
    #[arg(short, long)]
    pub build_dir: PathBuf,

    /// Persistent cache directory
    #[arg(short = 'C', long)]
    pub cache_dir: PathBuf,

    /// Output format for the result
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the signature command
#[derive(Parser, Debug)]
pub struct SignatureArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the dirs command
#[derive(Parser, Debug)]
pub struct DirsArgs {
    /// Application build directory
    #[arg(short, long)]
    pub build_dir: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the slug command
#[derive(Parser, Debug)]
pub struct SlugArgs {
    /// Application build directory
    #[arg(short, long)]
    pub build_dir: PathBuf,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON report
    Json,
}
