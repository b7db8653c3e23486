//! SQLite-backed persistence for preferences, execution history and snippets.
//!
//! One database file holds everything; each feature owns its own tables and
//! goes through [`Database::with_conn`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;

use crate::KernelError;

/// Database version for migrations.
const SCHEMA_VERSION: i32 = 1;

/// File name inside the data directory.
pub const DB_FILE_NAME: &str = "codepad.db";

/// Shared handle to the CodePad database.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database in the platform data directory
    /// (`~/.local/share/codepad/codepad.db` on Linux).
    pub fn open_default() -> Result<Self, KernelError> {
        Self::open(&default_db_path()?)
    }

    /// Open or create the database at a specific path.
    pub fn open(path: &Path) -> Result<Self, KernelError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!("Opened database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self, KernelError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, KernelError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self { conn: Mutex::new(conn) };
        db.initialize()?;
        Ok(db)
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<R>(
        &self,
        f: impl FnOnce(&Connection) -> Result<R, KernelError>,
    ) -> Result<R, KernelError> {
        let conn = self.conn.lock().map_err(|_| KernelError::LockPoisoned)?;
        f(&conn)
    }

    fn initialize(&self) -> Result<(), KernelError> {
        let version = self.schema_version()?;

        if version == 0 {
            self.create_schema()?;
        } else if version < SCHEMA_VERSION {
            self.migrate(version)?;
        }

        Ok(())
    }

    /// Current schema version, 0 for a fresh database.
    pub fn schema_version(&self) -> Result<i32, KernelError> {
        self.with_conn(|conn| {
            let exists: bool = conn
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type='table' AND name='meta'",
                    [],
                    |_| Ok(true),
                )
                .unwrap_or(false);

            if !exists {
                return Ok(0);
            }

            let version = conn
                .query_row("SELECT value FROM meta WHERE key = 'schema_version'", [], |row| {
                    let v: String = row.get(0)?;
                    Ok(v.parse().unwrap_or(0))
                })
                .unwrap_or(0);

            Ok(version)
        })
    }

    fn create_schema(&self) -> Result<(), KernelError> {
        self.with_conn(|conn| {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS meta (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                -- Editor preferences (font size, per-language source)
                CREATE TABLE IF NOT EXISTS preferences (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                -- Completed runs of signed-in users
                CREATE TABLE IF NOT EXISTS executions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id TEXT NOT NULL,
                    language TEXT NOT NULL,
                    code TEXT NOT NULL,
                    output TEXT,
                    error TEXT,
                    created_at TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_executions_user ON executions(user_id, created_at);

                -- Shared snippets
                CREATE TABLE IF NOT EXISTS snippets (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    user_name TEXT NOT NULL,
                    title TEXT NOT NULL,
                    language TEXT NOT NULL,
                    code TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS stars (
                    snippet_id TEXT NOT NULL,
                    user_id TEXT NOT NULL,
                    PRIMARY KEY (snippet_id, user_id),
                    FOREIGN KEY (snippet_id) REFERENCES snippets(id) ON DELETE CASCADE
                );

                INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', '1');
                "#,
            )?;
            Ok(())
        })
    }

    fn migrate(&self, from: i32) -> Result<(), KernelError> {
        // Only one schema version exists so far.
        tracing::info!("Migrating database schema from v{} to v{}", from, SCHEMA_VERSION);
        self.create_schema()
    }
}

/// Default database path inside the platform data directory.
pub fn default_db_path() -> Result<PathBuf, KernelError> {
    let dir = dirs::data_dir().ok_or(KernelError::NoDataDir)?;
    Ok(dir.join("codepad").join(DB_FILE_NAME))
}

/// Timestamps are stored as fixed-width RFC 3339 UTC strings so they sort
/// lexicographically.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, KernelError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| KernelError::Corrupt(format!("bad timestamp {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fresh_database_has_current_schema() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DB_FILE_NAME);
        let db = Database::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_reopen_keeps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILE_NAME);
        drop(Database::open(&path).unwrap());
        let db = Database::open(&path).unwrap();
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_timestamp_round_trip_and_ordering() {
        let early = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 11, 2, 3, 4, 5).unwrap();
        let (a, b) = (format_timestamp(early), format_timestamp(late));
        assert_eq!(a, "2026-01-02T03:04:05.000Z");
        assert!(a < b);
        assert_eq!(parse_timestamp(&a).unwrap(), early);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(parse_timestamp("yesterday"), Err(KernelError::Corrupt(_))));
    }
}
