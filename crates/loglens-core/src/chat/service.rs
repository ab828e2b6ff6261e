//! Chat service orchestrating uploads, turns, and history.
//!
//! Control flow:
//! - upload: decode bytes -> replace log context -> line count
//! - chat: read log context -> save user turn -> relay stream (assistant
//!   turn saved by the relay once the stream completes)
//! - history: read every turn

use std::sync::Arc;

use tracing::{debug, info};

use loglens_types::chat::{ChatTurn, TurnRole, UploadSummary};
use loglens_types::error::RepositoryError;

use crate::context::{LogContext, decode_upload};
use crate::llm::BoxLlmProvider;
use crate::relay::{InferenceRelay, RelayError, RelayReply};
use crate::transcript::TranscriptRepository;

/// Orchestrates the log-chat lifecycle.
///
/// Generic over `TranscriptRepository` to maintain clean architecture
/// (loglens-core never depends on loglens-infra).
pub struct ChatService<R: TranscriptRepository> {
    log_context: Arc<LogContext>,
    transcript: Arc<R>,
    relay: InferenceRelay<R>,
}

impl<R: TranscriptRepository + 'static> ChatService<R> {
    /// Wire a chat service around an injected log context.
    pub fn new(
        log_context: Arc<LogContext>,
        transcript: R,
        provider: BoxLlmProvider,
        model: impl Into<String>,
    ) -> Self {
        let transcript = Arc::new(transcript);
        let relay = InferenceRelay::new(provider, Arc::clone(&transcript), model);
        Self {
            log_context,
            transcript,
            relay,
        }
    }

    /// Access the log context.
    pub fn log_context(&self) -> &LogContext {
        &self.log_context
    }

    /// Access the transcript repository.
    pub fn transcript(&self) -> &R {
        &self.transcript
    }

    /// Access the inference relay.
    pub fn relay(&self) -> &InferenceRelay<R> {
        &self.relay
    }

    /// Replace the log context with an uploaded file.
    ///
    /// Invalid UTF-8 is dropped silently; the upload never fails.
    pub fn upload_log(&self, bytes: &[u8]) -> UploadSummary {
        let text = decode_upload(bytes);
        let dropped = bytes.len() - text.len();
        let lines = self.log_context.set(text);
        info!(lines, bytes = bytes.len(), dropped, "Log uploaded");
        UploadSummary { lines }
    }

    /// Start a chat turn.
    ///
    /// Without a log context this returns [`RelayReply::MissingContext`] and
    /// saves nothing. Otherwise the user turn is committed first, then the
    /// relay stream is returned.
    pub async fn chat(&self, message: &str) -> Result<RelayReply, RelayError> {
        let log_text = match self.log_context.get() {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!("Chat requested before any log upload");
                return Ok(RelayReply::MissingContext);
            }
        };

        let turn = self.transcript.append(TurnRole::User, message).await?;
        debug!(turn_id = turn.id, "User turn saved");

        Ok(self.relay.respond(&log_text, message))
    }

    /// Every persisted turn in conversation order.
    pub async fn history(&self) -> Result<Vec<ChatTurn>, RepositoryError> {
        self.transcript.read_all().await
    }
}
