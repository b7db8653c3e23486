//! CodePad kernel: the editor session state store and its collaborators.
//!
//! The [`EditorStore`] owns language, theme, font size, the attached editor
//! and the outcome of the last run. Everything persistent (preferences,
//! history, shared snippets) lives in one SQLite [`Database`].

mod editor;
mod error;
mod history;
mod persistence;
mod preferences;
mod session;
mod snippets;
mod stats;
mod store;

pub use editor::{EditorHandle, TextBuffer};
pub use error::KernelError;
pub use history::HistoryLog;
pub use persistence::{DB_FILE_NAME, Database, default_db_path};
pub use preferences::{
    FONT_SIZE_KEY, MemoryPreferences, PreferenceStore, SqlitePreferences, code_key,
};
pub use session::{EditorSession, LanguageChange};
pub use snippets::{NewSnippet, SnippetStore};
pub use stats::{user_stats, user_stats_at};
pub use store::{EditorStore, RunDisposition, RunObserver, RunPhase};
