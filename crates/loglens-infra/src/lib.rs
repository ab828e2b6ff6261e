//! Infrastructure layer for LogLens.
//!
//! Contains implementations of the port traits defined in `loglens-core`:
//! SQLite transcript storage, the Ollama streaming chat provider, and the
//! configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;
