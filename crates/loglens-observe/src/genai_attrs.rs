//! OpenTelemetry GenAI Semantic Convention names.
//!
//! `tracing` field names must be literal, so the relay and handlers spell
//! `gen_ai.*` attributes inline. This module holds the values shared
//! across crates: operation and provider names, and span naming.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"chat mistral"`)

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";

/// Provider name for a local Ollama server.
pub const PROVIDER_OLLAMA: &str = "ollama";

/// Span name for an operation on a model: `"{operation} {model}"`.
pub fn span_name(operation: &str, model: &str) -> String {
    format!("{operation} {model}")
}

/// Span name for a chat turn: `"chat {model}"`.
pub fn chat_span_name(model: &str) -> String {
    span_name(OP_CHAT, model)
}
