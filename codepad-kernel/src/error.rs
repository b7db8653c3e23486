//! Kernel error types.

use codepad_api::SnippetId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("invalid snippet: {0}")]
    InvalidSnippet(String),

    #[error("snippet not found: {0}")]
    SnippetNotFound(SnippetId),

    #[error("only the author may delete snippet {0}")]
    NotOwner(SnippetId),
}
