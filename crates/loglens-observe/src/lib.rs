//! Observability setup for LogLens: tracing subscriber initialization and
//! OpenTelemetry GenAI naming conventions.

pub mod genai_attrs;
pub mod tracing_setup;
