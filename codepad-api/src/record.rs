//! Persisted records: execution history, shared snippets, profile stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a signed-in user, as supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a shared snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnippetId(pub uuid::Uuid);

impl SnippetId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SnippetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SnippetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SnippetId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// A shared code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub user_id: UserId,
    pub user_name: String,
    pub title: String,
    pub language: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub stars: u32,
}

/// A stored run, written after a signed-in user executes code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub id: i64,
    pub user_id: UserId,
    pub language: String,
    pub code: String,
    pub output: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate figures shown on the profile dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub total_executions: u64,
    pub last_24_hours: u64,
    pub languages_count: usize,
    /// Distinct languages, alphabetical.
    pub languages: Vec<String>,
    pub favorite_language: Option<String>,
    pub most_starred_language: Option<String>,
    pub starred_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_id_parse_display() {
        let id = SnippetId::new();
        let parsed: SnippetId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_snippet_id_parse_invalid() {
        assert!("not-a-uuid".parse::<SnippetId>().is_err());
    }

    #[test]
    fn test_user_stats_serializes() {
        let stats = UserStats {
            total_executions: 3,
            favorite_language: Some("python".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_executions"], 3);
        assert_eq!(json["favorite_language"], "python");
        assert!(json["most_starred_language"].is_null());
    }
}
