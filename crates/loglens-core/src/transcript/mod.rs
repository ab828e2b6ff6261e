//! Chat transcript persistence abstraction for LogLens.
//!
//! This module defines the `TranscriptRepository` trait that the
//! infrastructure layer implements for the append-only chat history.

pub mod repository;

pub use repository::TranscriptRepository;
