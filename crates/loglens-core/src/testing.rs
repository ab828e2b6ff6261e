//! In-memory test doubles for the core ports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use loglens_types::chat::{ChatTurn, TurnRole};
use loglens_types::error::RepositoryError;
use loglens_types::llm::{ChatRequest, LlmError, StreamEvent, Usage};

use crate::llm::{EventStream, LlmProvider};
use crate::transcript::TranscriptRepository;

/// Transcript kept in a vector; ids start at 1 like an autoincrement key.
#[derive(Default)]
pub(crate) struct InMemoryTranscript {
    turns: Mutex<Vec<ChatTurn>>,
    fail_appends: AtomicBool,
}

impl InMemoryTranscript {
    pub(crate) fn turns(&self) -> Vec<ChatTurn> {
        self.turns.lock().unwrap().clone()
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.fail_appends.store(failing, Ordering::SeqCst);
    }
}

impl TranscriptRepository for InMemoryTranscript {
    async fn append(&self, role: TurnRole, content: &str) -> Result<ChatTurn, RepositoryError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(RepositoryError::Connection("database is locked".to_string()));
        }
        let mut turns = self.turns.lock().unwrap();
        let turn = ChatTurn {
            id: turns.len() as i64 + 1,
            role,
            content: content.to_string(),
        };
        turns.push(turn.clone());
        Ok(turn)
    }

    async fn read_all(&self) -> Result<Vec<ChatTurn>, RepositoryError> {
        Ok(self.turns())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.turns.lock().unwrap().len() as u64)
    }
}

/// Provider that replays a fixed list of fragments, optionally failing
/// before the fragment at `fail_at`.
pub(crate) struct ScriptedProvider {
    fragments: Vec<String>,
    fail_at: Option<usize>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedProvider {
    pub(crate) fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            fail_at: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub(crate) fn requests(&self) -> Arc<Mutex<Vec<ChatRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn check(&self, _model: &str) -> Result<(), LlmError> {
        Ok(())
    }

    fn stream(&self, request: ChatRequest) -> EventStream {
        self.requests.lock().unwrap().push(request);
        let fragments = self.fragments.clone();
        let fail_at = self.fail_at;

        Box::pin(async_stream::stream! {
            yield Ok(StreamEvent::Connected);
            let output_tokens = fragments.len() as u32;
            for (index, text) in fragments.into_iter().enumerate() {
                if fail_at == Some(index) {
                    yield Err(LlmError::Stream("connection reset by peer".to_string()));
                    return;
                }
                tokio::task::yield_now().await;
                yield Ok(StreamEvent::TextDelta { text });
            }
            yield Ok(StreamEvent::Usage(Usage {
                input_tokens: 42,
                output_tokens,
            }));
            yield Ok(StreamEvent::Done);
        })
    }
}
