//! Persisted editor preferences (key-value).
//!
//! Keys follow the playground's conventions: `editor-font-size` holds the
//! font size as a decimal string, and `editor-code-<language>` holds the last
//! edited source for that language. Last writer wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::{OptionalExtension, params};

use crate::{Database, KernelError};

pub const FONT_SIZE_KEY: &str = "editor-font-size";

/// Key holding the saved source for `language`.
pub fn code_key(language: &str) -> String {
    format!("editor-code-{language}")
}

/// A string key-value store.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KernelError>;
    fn set(&self, key: &str, value: &str) -> Result<(), KernelError>;
    fn remove(&self, key: &str) -> Result<(), KernelError>;
}

/// Process-local preferences, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, KernelError> {
        self.values.lock().map_err(|_| KernelError::LockPoisoned)
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, KernelError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KernelError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KernelError> {
        self.values()?.remove(key);
        Ok(())
    }
}

/// Preferences stored in the `preferences` table.
pub struct SqlitePreferences {
    db: Arc<Database>,
}

impl SqlitePreferences {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, KernelError> {
        self.db.with_conn(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM preferences WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KernelError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), KernelError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn PreferenceStore) {
        assert_eq!(store.get("missing").unwrap(), None);

        store.set(FONT_SIZE_KEY, "18").unwrap();
        assert_eq!(store.get(FONT_SIZE_KEY).unwrap().as_deref(), Some("18"));

        store.set(FONT_SIZE_KEY, "20").unwrap();
        assert_eq!(store.get(FONT_SIZE_KEY).unwrap().as_deref(), Some("20"));

        store.remove(FONT_SIZE_KEY).unwrap();
        assert_eq!(store.get(FONT_SIZE_KEY).unwrap(), None);

        // Removing an absent key is fine.
        store.remove(FONT_SIZE_KEY).unwrap();
    }

    #[test]
    fn test_code_key_format() {
        assert_eq!(code_key("python"), "editor-code-python");
    }

    #[test]
    fn test_memory_preferences() {
        exercise(&MemoryPreferences::new());
    }

    #[test]
    fn test_sqlite_preferences() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        exercise(&SqlitePreferences::new(db));
    }

    #[test]
    fn test_sqlite_preferences_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");

        let prefs = SqlitePreferences::new(Arc::new(Database::open(&path).unwrap()));
        prefs.set(&code_key("go"), "package main").unwrap();
        drop(prefs);

        let prefs = SqlitePreferences::new(Arc::new(Database::open(&path).unwrap()));
        assert_eq!(prefs.get(&code_key("go")).unwrap().as_deref(), Some("package main"));
    }
}
