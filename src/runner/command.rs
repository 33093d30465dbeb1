//! Process runner abstraction

use crate::error::NodeCacheResult;
use async_trait::async_trait;

/// Abstract process runner interface
///
/// Each call is attempted exactly once. Retry and timeout policy, if any,
/// belongs to the implementation.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a program to completion, failing on a non-zero exit status
    async fn run(&self, program: &str, args: &[&str]) -> NodeCacheResult<()>;

    /// Run a program and return its captured standard output
    async fn capture_stdout(&self, program: &str, args: &[&str]) -> NodeCacheResult<String>;
}
