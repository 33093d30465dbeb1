//! Values that fell back to a default instead of failing

use serde::Serialize;

/// A value plus the reason it degraded, if it did
///
/// Used where a failure must not stop the build but should still be
/// visible in logs and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degraded<T> {
    pub value: T,
    pub reason: Option<String>,
}

impl<T> Degraded<T> {
    /// A value obtained without falling back
    pub fn ok(value: T) -> Self {
        Self {
            value,
            reason: None,
        }
    }

    /// A fallback value and why it was needed
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            reason: Some(reason.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.reason.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
