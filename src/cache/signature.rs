//! Toolchain signature for cache invalidation
//!
//! A signature is the trimmed `--version` output of the runtime and both
//! package managers, joined with `"; "`. A cache is only trusted when the
//! signature it was saved under matches the current one byte for byte.

use crate::cache::degraded::Degraded;
use crate::config::schema::ToolchainConfig;
use crate::runner::CommandRunner;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Separator between version slots
const SEPARATOR: &str = "; ";

/// Identity of the active toolchain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// Build a signature from raw version strings in signature order
    pub fn from_versions(runtime: &str, package_manager: &str, alt_package_manager: &str) -> Self {
        Self(
            [runtime, package_manager, alt_package_manager]
                .iter()
                .map(|v| v.trim())
                .collect::<Vec<_>>()
                .join(SEPARATOR),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A version probe that did not produce output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
    pub program: String,
    pub reason: String,
}

/// Result of computing the signature, including probes that degraded
#[derive(Debug, Clone, Serialize)]
pub struct SignatureReport {
    pub signature: Signature,
    pub degraded: Vec<ProbeFailure>,
}

/// Ask one program for its version; failure degrades to an empty slot
async fn probe_version(runner: &dyn CommandRunner, program: &str) -> Degraded<String> {
    match runner.capture_stdout(program, &["--version"]).await {
        Ok(out) => Degraded::ok(out),
        Err(e) => Degraded::fallback(String::new(), e.to_string()),
    }
}

/// Compute the signature of the configured toolchain
///
/// Never fails: a probe that cannot run contributes an empty slot, which
/// can only ever cause a signature mismatch and a fresh cache.
pub async fn compute_signature(
    runner: &dyn CommandRunner,
    toolchain: &ToolchainConfig,
) -> SignatureReport {
    let mut versions = Vec::with_capacity(3);
    let mut degraded = Vec::new();

    for program in toolchain.programs() {
        let probe = probe_version(runner, program).await;
        if let Some(reason) = &probe.reason {
            warn!("Could not determine {} version: {}", program, reason);
            degraded.push(ProbeFailure {
                program: program.to_string(),
                reason: reason.clone(),
            });
        }
        versions.push(probe.into_value());
    }

    let signature = Signature::from_versions(&versions[0], &versions[1], &versions[2]);
    debug!("Computed toolchain signature: {}", signature);

    SignatureReport {
        signature,
        degraded,
    }
}
