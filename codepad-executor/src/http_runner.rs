//! HTTP client for a Piston-compatible execution backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use codepad_api::ExecutionResult;
use codepad_registry::LanguageRegistry;

use crate::wire::{ExecuteRequest, SourceFile};
use crate::{BackendResponse, ClientConfig, CodeRunner, ExecutionError, normalize};

/// Runs code by POSTing it to the configured endpoint.
pub struct HttpRunner {
    client: Client,
    endpoint: String,
    languages: Arc<LanguageRegistry>,
}

impl HttpRunner {
    pub fn new(
        config: ClientConfig,
        languages: Arc<LanguageRegistry>,
    ) -> Result<Self, ExecutionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| {
                ExecutionError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            languages,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CodeRunner for HttpRunner {
    async fn run(&self, code: &str, language_id: &str) -> Result<ExecutionResult, ExecutionError> {
        // Unknown languages never reach the network.
        let language = self
            .languages
            .get(language_id)
            .map_err(|e| ExecutionError::Configuration(e.to_string()))?;

        let request = ExecuteRequest {
            language: language.id,
            version: language.version,
            files: vec![SourceFile { content: code }],
        };

        tracing::debug!(
            "POST {} ({} {}, {} bytes)",
            self.endpoint,
            language.id,
            language.version,
            code.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Piston reports refusals as 4xx with a JSON `message`.
            let parsed = serde_json::from_str::<BackendResponse>(&body);
            if let Ok(BackendResponse { message: Some(message), .. }) = parsed {
                if status.is_client_error() {
                    return Err(ExecutionError::Backend(message));
                }
            }
            return Err(ExecutionError::Transport(format!(
                "backend returned {status}: {}",
                body.trim()
            )));
        }

        let body: BackendResponse = response
            .json()
            .await
            .map_err(|e| ExecutionError::Transport(format!("malformed backend response: {e}")))?;

        normalize(code, language.id, body)
    }
}
