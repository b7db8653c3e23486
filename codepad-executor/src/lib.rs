//! CodePad Executor - sends source code to a remote execution backend.
//!
//! The [`CodeRunner`] trait is the seam the editor store depends on;
//! [`HttpRunner`] is the production implementation talking to a
//! Piston-compatible HTTP endpoint.

mod config;
mod error;
mod http_runner;
mod wire;

pub use config::ClientConfig;
pub use error::ExecutionError;
pub use http_runner::HttpRunner;
pub use wire::{BackendResponse, Stage, normalize};

use codepad_api::ExecutionResult;

/// Runs a program remotely. One call is one outbound request; there are no
/// retries and no cancellation.
#[async_trait::async_trait]
pub trait CodeRunner: Send + Sync {
    async fn run(&self, code: &str, language_id: &str) -> Result<ExecutionResult, ExecutionError>;
}
