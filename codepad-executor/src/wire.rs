//! Backend wire format and result normalization.

use serde::{Deserialize, Serialize};

use codepad_api::ExecutionResult;

use crate::ExecutionError;

/// Request body for the execute endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ExecuteRequest<'a> {
    pub language: &'a str,
    pub version: &'a str,
    pub files: Vec<SourceFile<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SourceFile<'a> {
    pub content: &'a str,
}

/// Response body from the execute endpoint.
///
/// `message` is only present when the backend refused the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub run: Option<Stage>,
    #[serde(default)]
    pub compile: Option<Stage>,
}

/// Output of one stage (compile or run).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Stage {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// Interleaved stdout and stderr.
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub signal: Option<String>,
}

impl Stage {
    fn failed(&self) -> bool {
        self.code.is_some_and(|c| c != 0) || self.signal.is_some()
    }

    fn status(&self) -> Option<String> {
        if let Some(signal) = &self.signal {
            return Some(format!("killed by {signal}"));
        }
        match self.code {
            Some(code) if code != 0 => Some(format!("exited with code {code}")),
            _ => None,
        }
    }
}

/// Turn a backend response into an [`ExecutionResult`].
///
/// - a `message` is a backend refusal
/// - a failed compile stage yields `compile_error`
/// - otherwise non-empty run stdout wins, then non-empty run stderr
/// - a run with no output at all yields `stdout = Some("")`
pub fn normalize(
    code: &str,
    language: &str,
    response: BackendResponse,
) -> Result<ExecutionResult, ExecutionError> {
    if let Some(message) = response.message {
        return Err(ExecutionError::Backend(message));
    }

    let mut result = ExecutionResult {
        submitted_code: code.to_string(),
        submitted_language: language.to_string(),
        ..Default::default()
    };

    if let Some(compile) = response.compile.filter(Stage::failed) {
        let text = [&compile.stderr, &compile.output, &compile.stdout]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| "compilation failed".to_string());
        result.status_description = compile.status();
        result.compile_error = Some(text);
        return Ok(result);
    }

    let run = response.run.unwrap_or_default();
    result.status_description = run.status();

    if !run.stdout.is_empty() {
        result.stdout = Some(run.stdout);
    } else if !run.stderr.is_empty() {
        result.stderr = Some(run.stderr);
    } else {
        result.stdout = Some(String::new());
    }

    Ok(result)
}
