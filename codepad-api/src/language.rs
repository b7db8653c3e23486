//! Language metadata.

use serde::Serialize;

/// A supported programming language.
///
/// Entries are defined once at startup and never mutated, so every field
/// borrows from static data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageConfig {
    /// Unique registry key (e.g. `"python"`).
    pub id: &'static str,
    /// Display name.
    pub label: &'static str,
    /// Highlighter grammar name understood by the editor widget.
    pub syntax_id: &'static str,
    /// Starter snippet loaded when nothing was saved for this language.
    pub default_code: &'static str,
    /// Icon asset path.
    pub icon_path: &'static str,
    /// Version pin sent to the execution backend.
    pub version: &'static str,
    /// One-line subtitle shown in the selector.
    pub description: &'static str,
}
