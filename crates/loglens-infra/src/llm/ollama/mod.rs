//! OllamaProvider -- concrete [`LlmProvider`] implementation for a local
//! Ollama server.
//!
//! Streams chat replies from `POST /api/chat` and checks model availability
//! against `GET /api/tags`. No API key is involved.

pub mod streaming;
pub mod types;

use std::time::Duration;

use loglens_core::llm::{EventStream, LlmProvider};
use loglens_observe::genai_attrs::PROVIDER_OLLAMA;
use loglens_types::llm::{ChatRequest, LlmError};

use self::streaming::create_ollama_stream;
use self::types::{OllamaChatRequest, OllamaTagsResponse};

/// Ollama chat provider.
///
/// Only a connect timeout is set on the client: a reply may stream for as
/// long as the model keeps generating.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaProvider {
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a provider for the Ollama server at `base_url`
    /// (e.g., `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Self::CONNECT_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }
}

/// Whether `model` names one of the installed tags.
///
/// A bare model name matches any tag of that model (`mistral` matches
/// `mistral:latest`).
fn model_is_installed(tags: &OllamaTagsResponse, model: &str) -> bool {
    tags.models.iter().any(|tag| {
        tag.name == model
            || (!model.contains(':')
                && tag.name.split_once(':').is_some_and(|(name, _)| name == model))
    })
}

impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        PROVIDER_OLLAMA
    }

    async fn check(&self, model: &str) -> Result<(), LlmError> {
        let response = self
            .client
            .get(self.tags_url())
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("Ollama not reachable at {}: {e}", self.base_url),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Provider {
                message: format!("Ollama tags request failed with HTTP {status}"),
            });
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("ollama tags: {e}")))?;

        if model_is_installed(&tags, model) {
            tracing::debug!(model, installed = tags.models.len(), "Ollama model available");
            Ok(())
        } else {
            Err(LlmError::ModelNotFound(model.to_string()))
        }
    }

    fn stream(&self, request: ChatRequest) -> EventStream {
        let body = OllamaChatRequest::from(&request);
        create_ollama_stream(&self.client, &self.chat_url(), body)
    }
}
