//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](loglens_core::llm::LlmProvider)
//! for Ollama and a factory ([`create_provider`]) that builds it from the
//! `[llm]` config section.

pub mod ollama;

use loglens_core::llm::{BoxLlmProvider, LlmProvider};
use loglens_types::config::LlmConfig;
use loglens_types::llm::LlmError;

use self::ollama::OllamaProvider;

/// Create a [`BoxLlmProvider`] from an [`LlmConfig`].
pub fn create_provider(config: &LlmConfig) -> Result<BoxLlmProvider, LlmError> {
    let provider = OllamaProvider::new(config.base_url.clone())?;
    tracing::debug!(
        provider = LlmProvider::name(&provider),
        base_url = %provider.base_url(),
        model = %config.model,
        "LLM provider created"
    );
    Ok(BoxLlmProvider::new(provider))
}
