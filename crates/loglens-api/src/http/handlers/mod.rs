//! HTTP request handlers, one module per resource.

pub mod chat;
pub mod history;
pub mod upload;
