//! Shared snippets and stars.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{OptionalExtension, Row, params};

use codepad_api::{Snippet, SnippetId, UserId};
use codepad_registry::LanguageRegistry;

use crate::persistence::{format_timestamp, parse_timestamp};
use crate::{Database, KernelError};

const SELECT_SNIPPET: &str = "SELECT s.id, s.user_id, s.user_name, s.title, s.language, s.code,
        s.created_at,
        (SELECT COUNT(*) FROM stars st WHERE st.snippet_id = s.id)
     FROM snippets s";

/// Fields needed to share a snippet.
#[derive(Debug, Clone)]
pub struct NewSnippet<'a> {
    pub title: &'a str,
    pub language: &'a str,
    pub code: &'a str,
}

pub struct SnippetStore {
    db: Arc<Database>,
    languages: Arc<LanguageRegistry>,
}

impl SnippetStore {
    pub fn new(db: Arc<Database>, languages: Arc<LanguageRegistry>) -> Self {
        Self { db, languages }
    }

    /// Share a snippet. The title is trimmed and must be non-empty, the
    /// language must be registered and the code must be non-empty.
    pub fn create(
        &self,
        user: &UserId,
        user_name: &str,
        new: NewSnippet<'_>,
    ) -> Result<Snippet, KernelError> {
        self.create_at(user, user_name, new, Utc::now())
    }

    pub fn create_at(
        &self,
        user: &UserId,
        user_name: &str,
        new: NewSnippet<'_>,
        at: DateTime<Utc>,
    ) -> Result<Snippet, KernelError> {
        // Stored with millisecond precision; return what a later read sees.
        let at = at.trunc_subsecs(3);
        let title = new.title.trim();
        if title.is_empty() {
            return Err(KernelError::InvalidSnippet("title is required".to_string()));
        }
        if new.code.trim().is_empty() {
            return Err(KernelError::InvalidSnippet("code is required".to_string()));
        }
        let language = self
            .languages
            .find(new.language)
            .ok_or_else(|| KernelError::UnknownLanguage(new.language.to_string()))?;

        let snippet = Snippet {
            id: SnippetId::new(),
            user_id: user.clone(),
            user_name: user_name.to_string(),
            title: title.to_string(),
            language: language.id.to_string(),
            code: new.code.to_string(),
            created_at: at,
            stars: 0,
        };

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO snippets (id, user_id, user_name, title, language, code, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    snippet.id.to_string(),
                    snippet.user_id.as_str(),
                    snippet.user_name,
                    snippet.title,
                    snippet.language,
                    snippet.code,
                    format_timestamp(at),
                ],
            )?;
            Ok(())
        })?;

        tracing::info!("Shared snippet {} ({}) by {}", snippet.id, snippet.language, user);
        Ok(snippet)
    }

    pub fn get(&self, id: SnippetId) -> Result<Option<Snippet>, KernelError> {
        let raw = self.db.with_conn(|conn| {
            let sql = format!("{SELECT_SNIPPET} WHERE s.id = ?1");
            Ok(conn.query_row(&sql, params![id.to_string()], raw_snippet).optional()?)
        })?;
        raw.map(RawSnippet::into_snippet).transpose()
    }

    /// All snippets, newest first.
    pub fn list(&self) -> Result<Vec<Snippet>, KernelError> {
        self.query(&format!("{SELECT_SNIPPET} ORDER BY s.created_at DESC"), params![])
    }

    /// Case-insensitive match of `query` against title, language and author,
    /// optionally restricted to one language. An empty query matches everything.
    pub fn search(&self, query: &str, language: Option<&str>) -> Result<Vec<Snippet>, KernelError> {
        let needle = query.trim().to_lowercase();
        let snippets = self.list()?;

        Ok(snippets
            .into_iter()
            .filter(|s| language.is_none_or(|lang| s.language == lang))
            .filter(|s| {
                needle.is_empty()
                    || s.title.to_lowercase().contains(&needle)
                    || s.language.to_lowercase().contains(&needle)
                    || s.user_name.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Delete a snippet and its stars. Only the author may do this.
    pub fn delete(&self, id: SnippetId, user: &UserId) -> Result<(), KernelError> {
        let snippet = self.get(id)?.ok_or(KernelError::SnippetNotFound(id))?;
        if &snippet.user_id != user {
            return Err(KernelError::NotOwner(id));
        }

        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM snippets WHERE id = ?1", params![id.to_string()])?;
            Ok(())
        })?;
        tracing::info!("Deleted snippet {}", id);
        Ok(())
    }

    /// Star or unstar. Returns whether the snippet is starred afterwards.
    pub fn toggle_star(&self, id: SnippetId, user: &UserId) -> Result<bool, KernelError> {
        if self.get(id)?.is_none() {
            return Err(KernelError::SnippetNotFound(id));
        }

        self.db.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM stars WHERE snippet_id = ?1 AND user_id = ?2",
                params![id.to_string(), user.as_str()],
            )?;
            if removed > 0 {
                return Ok(false);
            }
            conn.execute(
                "INSERT INTO stars (snippet_id, user_id) VALUES (?1, ?2)",
                params![id.to_string(), user.as_str()],
            )?;
            Ok(true)
        })
    }

    pub fn is_starred(&self, id: SnippetId, user: &UserId) -> Result<bool, KernelError> {
        self.db.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM stars WHERE snippet_id = ?1 AND user_id = ?2",
                    params![id.to_string(), user.as_str()],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Snippets the user has starred, newest first.
    pub fn starred_by(&self, user: &UserId) -> Result<Vec<Snippet>, KernelError> {
        self.query(
            &format!(
                "{SELECT_SNIPPET} JOIN stars mine ON mine.snippet_id = s.id
                 WHERE mine.user_id = ?1 ORDER BY s.created_at DESC"
            ),
            params![user.as_str()],
        )
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Snippet>, KernelError> {
        let raws = self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map(params, raw_snippet)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })?;
        raws.into_iter().map(RawSnippet::into_snippet).collect()
    }
}

struct RawSnippet {
    id: String,
    user_id: String,
    user_name: String,
    title: String,
    language: String,
    code: String,
    created_at: String,
    stars: u32,
}

impl RawSnippet {
    fn into_snippet(self) -> Result<Snippet, KernelError> {
        let id = self
            .id
            .parse()
            .map_err(|e| KernelError::Corrupt(format!("bad snippet id {:?}: {e}", self.id)))?;
        Ok(Snippet {
            id,
            user_id: UserId(self.user_id),
            user_name: self.user_name,
            title: self.title,
            language: self.language,
            code: self.code,
            created_at: parse_timestamp(&self.created_at)?,
            stars: self.stars,
        })
    }
}

fn raw_snippet(row: &Row<'_>) -> rusqlite::Result<RawSnippet> {
    Ok(RawSnippet {
        id: row.get(0)?,
        user_id: row.get(1)?,
        user_name: row.get(2)?,
        title: row.get(3)?,
        language: row.get(4)?,
        code: row.get(5)?,
        created_at: row.get(6)?,
        stars: row.get(7)?,
    })
}
