//! Session log context.
//!
//! Holds the most recently uploaded log text and the helpers that turn raw
//! upload bytes into that text.

pub mod decode;
pub mod log_context;

pub use decode::{count_lines, decode_upload};
pub use log_context::LogContext;
