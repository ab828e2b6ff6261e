//! BoxLlmProvider -- object-safe dynamic dispatch wrapper for LlmProvider.
//!
//! 1. Define an object-safe `LlmProviderDyn` trait with boxed futures
//! 2. Blanket-impl `LlmProviderDyn` for all `T: LlmProvider`
//! 3. `BoxLlmProvider` wraps `Box<dyn LlmProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use loglens_types::llm::{ChatRequest, LlmError};

use super::provider::{EventStream, LlmProvider};

/// Object-safe version of [`LlmProvider`] with boxed futures.
pub trait LlmProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn check_boxed<'a>(
        &'a self,
        model: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), LlmError>> + Send + 'a>>;

    fn stream_boxed(&self, request: ChatRequest) -> EventStream;
}

impl<T: LlmProvider> LlmProviderDyn for T {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn check_boxed<'a>(
        &'a self,
        model: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), LlmError>> + Send + 'a>> {
        Box::pin(self.check(model))
    }

    fn stream_boxed(&self, request: ChatRequest) -> EventStream {
        self.stream(request)
    }
}

/// Type-erased LLM provider.
///
/// Lets the application state hold the real Ollama provider in production
/// and a scripted provider in tests without becoming generic over it.
pub struct BoxLlmProvider {
    inner: Box<dyn LlmProviderDyn + Send + Sync>,
}

impl BoxLlmProvider {
    /// Wrap a concrete `LlmProvider` in a type-erased box.
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Verify the backend is reachable and serves `model`.
    pub async fn check(&self, model: &str) -> Result<(), LlmError> {
        self.inner.check_boxed(model).await
    }

    /// Send a streaming chat request. Returns a stream of events.
    pub fn stream(&self, request: ChatRequest) -> EventStream {
        self.inner.stream_boxed(request)
    }
}
