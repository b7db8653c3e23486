//! Execution error taxonomy.

use thiserror::Error;

/// Why a run produced no usable output.
///
/// Callers route every variant to the error channel, but they stay
/// distinguishable: configuration errors never touch the network, transport
/// errors mean the backend was not reached (or answered badly), and backend
/// errors are well-formed refusals from the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Backend(String),
}

impl ExecutionError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

impl From<reqwest::Error> for ExecutionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("request timed out: {e}"))
        } else {
            Self::Transport(e.to_string())
        }
    }
}
