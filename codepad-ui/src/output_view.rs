//! What the output panel shows for a given store snapshot.

use serde::Serialize;

use codepad_api::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum OutputView {
    /// A run is in flight; previous results stay hidden.
    Running,
    Error(String),
    Output(String),
    /// Nothing run yet.
    Idle,
}

impl OutputView {
    pub fn from_parts(is_running: bool, output: Option<&str>, error: Option<&str>) -> Self {
        if is_running {
            return Self::Running;
        }
        match (error, output) {
            (Some(error), _) => Self::Error(error.to_string()),
            (None, Some(output)) => Self::Output(output.to_string()),
            (None, None) => Self::Idle,
        }
    }

    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self::from_parts(snapshot.is_running, snapshot.output.as_deref(), snapshot.error.as_deref())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
