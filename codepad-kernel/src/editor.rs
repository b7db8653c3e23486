//! The live editor widget as seen by the store.

use std::sync::{Mutex, PoisonError};

/// Capability to read and replace the text of a mounted editor widget.
///
/// The store borrows this; creating and destroying the widget is the UI
/// layer's job. Text passes through untouched in both directions.
pub trait EditorHandle: Send + Sync {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

/// Plain in-memory editor buffer, used headless (CLI, tests).
#[derive(Debug, Default)]
pub struct TextBuffer {
    text: Mutex<String>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Mutex::new(text.into()) }
    }
}

impl EditorHandle for TextBuffer {
    fn text(&self) -> String {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text.to_string();
    }
}
