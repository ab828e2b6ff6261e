//! LlmProvider trait definition.
//!
//! Uses RPITIT for `check`, and `Pin<Box<dyn Stream>>` for `stream`
//! (streams need to be object-safe for the BoxLlmProvider wrapper).

use std::pin::Pin;

use futures_util::Stream;

use loglens_types::llm::{ChatRequest, LlmError, StreamEvent};

/// Boxed stream of provider events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for chat-completion backends (Ollama, scripted test doubles).
///
/// Implementations live in loglens-infra (e.g., `OllamaProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Verify the backend is reachable and serves `model`.
    fn check(
        &self,
        model: &str,
    ) -> impl std::future::Future<Output = Result<(), LlmError>> + Send;

    /// Send a streaming chat request. Returns a stream of events.
    ///
    /// The stream is lazy: no request is sent until it is first polled.
    fn stream(&self, request: ChatRequest) -> EventStream;
}
