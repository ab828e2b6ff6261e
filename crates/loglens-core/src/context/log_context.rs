//! Single-slot holder for the uploaded log text.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::decode::count_lines;

/// The most recently uploaded log, shared by every request of one server.
///
/// Lifecycle: empty at construction, replaced wholesale by each [`set`],
/// never persisted. The lock only guards the pointer swap; readers get an
/// `Arc` snapshot, so a chat racing an upload sees either the old or the new
/// text in full. Last writer wins.
///
/// [`set`]: LogContext::set
#[derive(Debug, Default)]
pub struct LogContext {
    slot: RwLock<Option<Arc<str>>>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored log text and return its line count.
    pub fn set(&self, text: String) -> usize {
        let lines = count_lines(&text);
        let bytes = text.len();
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::from(text));
        debug!(lines, bytes, "Log context replaced");
        lines
    }

    /// The stored log text, or `None` if nothing was ever uploaded.
    pub fn get(&self) -> Option<Arc<str>> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = LogContext::new();
        assert!(ctx.get().is_none());
    }

    #[test]
    fn test_set_then_get_returns_text() {
        let ctx = LogContext::new();
        let lines = ctx.set("ERROR at 10:02\nWARN at 10:05".to_string());
        assert_eq!(lines, 2);
        assert_eq!(ctx.get().as_deref(), Some("ERROR at 10:02\nWARN at 10:05"));
    }

    #[test]
    fn test_second_upload_overwrites_first() {
        let ctx = LogContext::new();
        ctx.set("first log".to_string());
        ctx.set("second log\nwith two lines".to_string());
        assert_eq!(ctx.get().as_deref(), Some("second log\nwith two lines"));
    }

    #[test]
    fn test_empty_upload_replaces_previous_text() {
        let ctx = LogContext::new();
        ctx.set("previous".to_string());
        assert_eq!(ctx.set(String::new()), 0);
        assert_eq!(ctx.get().as_deref(), Some(""));
    }

    #[test]
    fn test_snapshot_survives_overwrite() {
        let ctx = LogContext::new();
        ctx.set("old".to_string());
        let snapshot = ctx.get().unwrap();
        ctx.set("new".to_string());
        assert_eq!(&*snapshot, "old");
        assert_eq!(ctx.get().as_deref(), Some("new"));
    }
}
