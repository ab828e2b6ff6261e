//! Shared domain types for LogLens.
//!
//! This crate contains the core domain types used across the LogLens backend:
//! chat turns, LLM request/stream shapes, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
