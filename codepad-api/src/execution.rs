//! Outcome of a single run against the execution backend.

use serde::{Deserialize, Serialize};

/// Normalized result of one run.
///
/// At most one of `stdout`, `stderr` and `compile_error` is populated. A run
/// that produced nothing at all carries `stdout = Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Exact source that was sent.
    pub submitted_code: String,
    pub submitted_language: String,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_error: Option<String>,
    /// Human-readable status from the backend (exit code, signal).
    pub status_description: Option<String>,
}

impl ExecutionResult {
    /// Whether the run produced usable output.
    pub fn is_success(&self) -> bool {
        self.stdout.is_some() && self.error_text().is_none()
    }

    /// The text that should be reported as an error, if any.
    pub fn error_text(&self) -> Option<&str> {
        self.compile_error.as_deref().or(self.stderr.as_deref())
    }
}

/// Snapshot of the most recent completed run, handed to history collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub code: String,
    pub language: String,
    pub output: Option<String>,
    pub error: Option<String>,
}

/// Terminal outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Succeeded,
    Failed,
}
