//! HTTP API layer for LogLens.
//!
//! Axum routes for log upload, streamed chat and transcript history, with
//! permissive CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
