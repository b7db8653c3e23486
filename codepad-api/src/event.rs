//! Store snapshots and change events emitted to subscribers (renderers, loggers).

use serde::{Deserialize, Serialize};

use crate::RunOutcome;

/// Read-only view of the editor session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub language: String,
    pub theme: String,
    pub font_size: u32,
    pub output: Option<String>,
    pub error: Option<String>,
    pub is_running: bool,
    /// Whether a live editor handle is attached.
    pub has_editor: bool,
}

/// Events emitted by the editor store after each action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    LanguageChanged { language: String },
    ThemeChanged { theme: String },
    FontSizeChanged { font_size: u32 },
    EditorAttached,
    EditorDetached,
    RunStarted { language: String },
    RunFinished { outcome: RunOutcome },
}
