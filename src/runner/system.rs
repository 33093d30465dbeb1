//! Process runner backed by `tokio::process`

use crate::error::{NodeCacheError, NodeCacheResult};
use crate::runner::command::CommandRunner;
use async_trait::async_trait;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Runs programs from `PATH` on the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }

    async fn exec(&self, program: &str, args: &[&str]) -> NodeCacheResult<Output> {
        debug!("Executing: {} {:?}", program, args);

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| NodeCacheError::command_failed(describe(program, args), e))
    }
}

fn describe(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> NodeCacheResult<()> {
        let output = self.exec(program, args).await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(NodeCacheError::command_exec(
                describe(program, args),
                stderr.trim(),
            ))
        }
    }

    async fn capture_stdout(&self, program: &str, args: &[&str]) -> NodeCacheResult<String> {
        let output = self.exec(program, args).await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(NodeCacheError::command_exec(
                describe(program, args),
                stderr.trim(),
            ))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn capture_stdout_returns_output() {
        let out = SystemRunner::new()
            .capture_stdout("sh", &["-c", "echo v20.11.0"])
            .await
            .unwrap();
        assert_eq!(out, "v20.11.0\n");
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let err = SystemRunner::new()
            .capture_stdout("sh", &["-c", "echo oops >&2; exit 3"])
            .await
            .unwrap_err();
        assert!(matches!(err, NodeCacheError::CommandExecution { ref stderr, .. } if stderr == "oops"));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let err = SystemRunner::new()
            .run("nodecache-definitely-not-installed", &["--version"])
            .await
            .unwrap_err();
        assert!(matches!(err, NodeCacheError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn run_succeeds_on_zero_exit() {
        SystemRunner::new().run("true", &[]).await.unwrap();
    }
}
