//! Inference relay: one chat turn from prompt to persisted reply.
//!
//! The provider's event stream is the producer. Every text fragment goes to
//! two consumers at once: the caller (immediately, in arrival order) and a
//! [`ReplyAccumulator`]. Only when the producer reports successful
//! exhaustion is the accumulated reply appended to the transcript.

pub mod accumulator;
pub mod engine;
pub mod prompt;

use std::pin::Pin;

use futures_util::Stream;
use thiserror::Error;

use loglens_types::error::RepositoryError;
use loglens_types::llm::LlmError;

pub use accumulator::ReplyAccumulator;
pub use engine::InferenceRelay;

/// Fixed answer returned when no log has been uploaded yet.
pub const MISSING_CONTEXT_ANSWER: &str = "Please upload a log file first.";

/// Stream of reply fragments handed to the response writer.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, RelayError>> + Send + 'static>>;

/// Outcome of starting a chat turn.
pub enum RelayReply {
    /// No log context: answer with [`MISSING_CONTEXT_ANSWER`], nothing streamed.
    MissingContext,
    /// The model reply, fragment by fragment.
    Streaming(FragmentStream),
}

impl RelayReply {
    pub fn is_missing_context(&self) -> bool {
        matches!(self, RelayReply::MissingContext)
    }
}

/// Errors that end a relayed turn.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("inference failed: {0}")]
    Llm(#[from] LlmError),

    #[error("transcript write failed: {0}")]
    Repository(#[from] RepositoryError),
}
