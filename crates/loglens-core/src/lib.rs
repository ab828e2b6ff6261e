//! Business logic and port trait definitions for LogLens.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the chat pipeline built on top of
//! them. It depends only on `loglens-types` -- never on `loglens-infra` or
//! any database/IO crate.

pub mod chat;
pub mod context;
pub mod llm;
pub mod relay;
pub mod transcript;

#[cfg(test)]
pub(crate) mod testing;
