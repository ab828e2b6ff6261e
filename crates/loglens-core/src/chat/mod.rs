//! Chat orchestration for LogLens.
//!
//! `ChatService` ties the log context, transcript, and inference relay
//! together behind the three operations the HTTP layer exposes.

pub mod service;

pub use service::ChatService;
