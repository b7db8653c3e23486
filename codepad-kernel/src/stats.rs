//! Profile statistics derived from history and stars.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rusqlite::params;

use codepad_api::{UserId, UserStats};

use crate::persistence::format_timestamp;
use crate::{Database, KernelError};

pub fn user_stats(db: &Database, user: &UserId) -> Result<UserStats, KernelError> {
    user_stats_at(db, user, Utc::now())
}

/// Stats as of `now`. Ties for favourite and most-starred language go to the
/// alphabetically first language.
pub fn user_stats_at(
    db: &Database,
    user: &UserId,
    now: DateTime<Utc>,
) -> Result<UserStats, KernelError> {
    let since = format_timestamp(now - Duration::hours(24));

    db.with_conn(|conn| {
        let (total, recent): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(created_at >= ?2), 0)
             FROM executions WHERE user_id = ?1",
            params![user.as_str(), since],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let by_language = counts(
            conn,
            "SELECT language, COUNT(*) FROM executions WHERE user_id = ?1 GROUP BY language",
            user,
        )?;
        let starred = counts(
            conn,
            "SELECT s.language, COUNT(*) FROM stars st JOIN snippets s ON s.id = st.snippet_id
             WHERE st.user_id = ?1 GROUP BY s.language",
            user,
        )?;

        Ok(UserStats {
            total_executions: total as u64,
            last_24_hours: recent as u64,
            languages_count: by_language.len(),
            languages: by_language.keys().cloned().collect(),
            favorite_language: top(&by_language),
            most_starred_language: top(&starred),
            starred_count: starred.values().sum(),
        })
    })
}

fn counts(
    conn: &rusqlite::Connection,
    sql: &str,
    user: &UserId,
) -> Result<BTreeMap<String, u64>, KernelError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![user.as_str()], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
    })?;
    Ok(rows.collect::<rusqlite::Result<BTreeMap<_, _>>>()?)
}

/// Highest count wins; the map is ordered, so the first maximum is the
/// alphabetically first.
fn top(counts: &BTreeMap<String, u64>) -> Option<String> {
    let mut best: Option<(&String, u64)> = None;
    for (language, &count) in counts {
        if best.is_none_or(|(_, n)| count > n) {
            best = Some((language, count));
        }
    }
    best.map(|(language, _)| language.clone())
}
