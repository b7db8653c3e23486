//! Execution history for signed-in users.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{Row, params};

use codepad_api::{ExecutionRecord, RunSnapshot, UserId};

use crate::persistence::{format_timestamp, parse_timestamp};
use crate::{Database, KernelError, RunObserver};

/// Records completed runs of whoever is currently signed in.
///
/// Anonymous runs are not recorded.
pub struct HistoryLog {
    db: Arc<Database>,
    user: Mutex<Option<UserId>>,
}

impl HistoryLog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db, user: Mutex::new(None) }
    }

    pub fn sign_in(&self, user: UserId) {
        tracing::debug!("History recording enabled for {}", user);
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn sign_out(&self) {
        self.user.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Store one run for `user`, timestamped now.
    pub fn record(&self, user: &UserId, run: &RunSnapshot) -> Result<ExecutionRecord, KernelError> {
        self.record_at(user, run, Utc::now())
    }

    pub fn record_at(
        &self,
        user: &UserId,
        run: &RunSnapshot,
        at: DateTime<Utc>,
    ) -> Result<ExecutionRecord, KernelError> {
        insert_execution(&self.db, user, run, at)
    }

    /// The user's most recent runs, newest first.
    pub fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<ExecutionRecord>, KernelError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, language, code, output, error, created_at
                 FROM executions WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user.as_str(), limit], raw_record)?;

            let mut records = Vec::new();
            for row in rows {
                records.push(row?.into_record()?);
            }
            Ok(records)
        })
    }
}

#[async_trait]
impl RunObserver for HistoryLog {
    async fn on_run_finished(&self, run: &RunSnapshot) -> anyhow::Result<()> {
        let Some(user) = self.current_user() else {
            return Ok(());
        };
        // SQLite I/O stays off the async worker threads.
        let db = self.db.clone();
        let run = run.clone();
        tokio::task::spawn_blocking(move || insert_execution(&db, &user, &run, Utc::now())).await??;
        Ok(())
    }
}

fn insert_execution(
    db: &Database,
    user: &UserId,
    run: &RunSnapshot,
    at: DateTime<Utc>,
) -> Result<ExecutionRecord, KernelError> {
    // Stored with millisecond precision; return what a later read sees.
    let at = at.trunc_subsecs(3);
    let id = db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO executions (user_id, language, code, output, error, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.as_str(),
                run.language,
                run.code,
                run.output,
                run.error,
                format_timestamp(at),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })?;

    tracing::debug!("Recorded execution {} for {}", id, user);
    Ok(ExecutionRecord {
        id,
        user_id: user.clone(),
        language: run.language.clone(),
        code: run.code.clone(),
        output: run.output.clone(),
        error: run.error.clone(),
        created_at: at,
    })
}

struct RawRecord {
    id: i64,
    user_id: String,
    language: String,
    code: String,
    output: Option<String>,
    error: Option<String>,
    created_at: String,
}

impl RawRecord {
    fn into_record(self) -> Result<ExecutionRecord, KernelError> {
        Ok(ExecutionRecord {
            id: self.id,
            user_id: UserId(self.user_id),
            language: self.language,
            code: self.code,
            output: self.output,
            error: self.error,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn raw_record(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        language: row.get(2)?,
        code: row.get(3)?,
        output: row.get(4)?,
        error: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn log() -> HistoryLog {
        HistoryLog::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn run(language: &str, code: &str) -> RunSnapshot {
        RunSnapshot {
            code: code.to_string(),
            language: language.to_string(),
            output: Some("ok".to_string()),
            error: None,
        }
    }

    #[test]
    fn test_record_and_recent_newest_first() {
        let log = log();
        let alice = UserId::new("alice");
        let t0 = Utc::now();

        log.record_at(&alice, &run("python", "a"), t0 - Duration::minutes(2)).unwrap();
        log.record_at(&alice, &run("go", "b"), t0).unwrap();
        log.record_at(&alice, &run("rust", "c"), t0 - Duration::minutes(1)).unwrap();

        let recent = log.recent(&alice, 10).unwrap();
        let codes: Vec<_> = recent.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["b", "c", "a"]);

        assert_eq!(log.recent(&alice, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_record_matches_stored_row() {
        let log = log();
        let alice = UserId::new("alice");
        let recorded = log.record(&alice, &run("go", "fmt.Println(1)")).unwrap();

        let stored = log.recent(&alice, 1).unwrap().remove(0);
        assert_eq!(stored, recorded);
        assert_eq!(stored.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_recent_is_per_user() {
        let log = log();
        log.record(&UserId::new("alice"), &run("python", "a")).unwrap();
        log.record(&UserId::new("bob"), &run("go", "b")).unwrap();

        let bob = log.recent(&UserId::new("bob"), 10).unwrap();
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].language, "go");
        assert!(log.recent(&UserId::new("carol"), 10).unwrap().is_empty());
    }

    #[test]
    fn test_record_preserves_error_fields() {
        let log = log();
        let alice = UserId::new("alice");
        let failed = RunSnapshot {
            code: "1/0".to_string(),
            language: "ruby".to_string(),
            output: None,
            error: Some("ZeroDivisionError".to_string()),
        };
        log.record(&alice, &failed).unwrap();

        let stored = &log.recent(&alice, 1).unwrap()[0];
        assert_eq!(stored.output, None);
        assert_eq!(stored.error.as_deref(), Some("ZeroDivisionError"));
    }

    #[tokio::test]
    async fn test_observer_records_only_when_signed_in() {
        let log = log();
        let alice = UserId::new("alice");

        log.on_run_finished(&run("python", "anon")).await.unwrap();
        assert!(log.recent(&alice, 10).unwrap().is_empty());

        log.sign_in(alice.clone());
        log.on_run_finished(&run("python", "mine")).await.unwrap();
        assert_eq!(log.recent(&alice, 10).unwrap()[0].code, "mine");

        log.sign_out();
        log.on_run_finished(&run("python", "later")).await.unwrap();
        assert_eq!(log.recent(&alice, 10).unwrap().len(), 1);
    }
}
