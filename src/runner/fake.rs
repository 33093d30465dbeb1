//! Scripted runner for tests

use crate::error::{NodeCacheError, NodeCacheResult};
use crate::runner::CommandRunner;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers `capture_stdout` from a fixed table keyed by program name.
/// Programs missing from the table fail as if not installed.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_output(mut self, program: &str, stdout: &str) -> Self {
        self.outputs.insert(program.to_string(), stdout.to_string());
        self
    }

    /// Runner reporting the given node, npm and yarn versions
    pub(crate) fn toolchain(node: &str, npm: &str, yarn: &str) -> Self {
        Self::new()
            .with_output("node", node)
            .with_output("npm", npm)
            .with_output("yarn", yarn)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, program: &str, args: &[&str]) -> NodeCacheResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", program, args.join(" ")));
        self.outputs.get(program).cloned().ok_or_else(|| {
            NodeCacheError::command_failed(
                program,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            )
        })
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str]) -> NodeCacheResult<()> {
        self.lookup(program, args).map(|_| ())
    }

    async fn capture_stdout(&self, program: &str, args: &[&str]) -> NodeCacheResult<String> {
        self.lookup(program, args)
    }
}
