//! Editor session glue: keeps the editor text, the store and saved
//! preferences in step.
//!
//! The store itself never touches persistence; this layer decides what is
//! loaded into the editor when the language changes and what gets saved.

use std::sync::Arc;

use codepad_registry::Entitlement;

use crate::preferences::{FONT_SIZE_KEY, code_key};
use crate::{EditorHandle, EditorStore, KernelError, PreferenceStore};

/// Why a language switch was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChange {
    Applied,
    /// Needs full access.
    Locked,
    Unknown,
}

pub struct EditorSession {
    store: EditorStore,
    prefs: Arc<dyn PreferenceStore>,
}

impl EditorSession {
    /// Wrap `store` and restore saved preferences into it.
    pub fn new(store: EditorStore, prefs: Arc<dyn PreferenceStore>) -> Self {
        store.restore_preferences(prefs.as_ref());
        Self { store, prefs }
    }

    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    /// The widget is ready: attach it and show the current language's code.
    pub fn mount(&self, handle: Arc<dyn EditorHandle>) -> Result<(), KernelError> {
        self.store.attach_editor_handle(handle.clone());
        handle.set_text(&self.code_for(self.store.language())?);
        Ok(())
    }

    pub fn unmount(&self) {
        self.store.detach_editor_handle();
    }

    /// Switch language if allowed, then load its saved code (or the
    /// language's default) into the editor.
    pub fn select_language(
        &self,
        id: &str,
        entitlement: &Entitlement,
    ) -> Result<LanguageChange, KernelError> {
        if !self.store.languages().contains(id) {
            return Ok(LanguageChange::Unknown);
        }
        if !entitlement.can_select(id) {
            tracing::debug!("Language {} requires full access", id);
            return Ok(LanguageChange::Locked);
        }

        // Read before switching so a failed read leaves language and text paired.
        let code = self.code_for(id)?;
        self.store.set_language(id);
        if let Some(editor) = self.store.editor() {
            editor.set_text(&code);
        }
        Ok(LanguageChange::Applied)
    }

    /// Persist edits under the current language. Empty text is not saved.
    pub fn on_editor_change(&self, text: &str) -> Result<(), KernelError> {
        if text.is_empty() {
            return Ok(());
        }
        self.prefs.set(&code_key(self.store.language()), text)
    }

    /// Replace the editor text with the language default and forget the
    /// saved copy.
    pub fn reset_to_default(&self) -> Result<(), KernelError> {
        let language = self.store.language();
        if let Some(editor) = self.store.editor() {
            editor.set_text(self.default_code(language));
        }
        self.prefs.remove(&code_key(language))
    }

    /// Clamp, apply and persist a font size. Returns the applied size.
    pub fn change_font_size(&self, requested: i64) -> Result<u32, KernelError> {
        let size = self.store.set_font_size(requested);
        self.prefs.set(FONT_SIZE_KEY, &size.to_string())?;
        Ok(size)
    }

    fn default_code(&self, language: &str) -> &'static str {
        self.store
            .languages()
            .find(language)
            .map(|config| config.default_code)
            .unwrap_or_default()
    }

    /// Saved source for `language`, or its starter code when nothing
    /// (or only an empty string) was saved.
    fn code_for(&self, language: &str) -> Result<String, KernelError> {
        let saved = self.prefs.get(&code_key(language))?.filter(|code| !code.is_empty());
        Ok(saved.unwrap_or_else(|| self.default_code(language).to_string()))
    }
}
