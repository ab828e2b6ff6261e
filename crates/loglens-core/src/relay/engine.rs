//! InferenceRelay -- drives a single streamed chat turn.

use std::sync::Arc;
use std::time::Instant;

use futures_util::{Stream, StreamExt};
use tracing::{debug, info, warn};

use loglens_types::chat::TurnRole;
use loglens_types::llm::StreamEvent;

use super::accumulator::ReplyAccumulator;
use super::prompt::build_chat_request;
use super::{RelayError, RelayReply};
use crate::llm::{BoxLlmProvider, EventStream};
use crate::transcript::TranscriptRepository;

/// Builds the prompt for a turn, streams the model reply to the caller, and
/// persists the full reply once the model finishes.
pub struct InferenceRelay<R: TranscriptRepository> {
    provider: BoxLlmProvider,
    transcript: Arc<R>,
    model: String,
}

impl<R: TranscriptRepository + 'static> InferenceRelay<R> {
    pub fn new(provider: BoxLlmProvider, transcript: Arc<R>, model: impl Into<String>) -> Self {
        Self {
            provider,
            transcript,
            model: model.into(),
        }
    }

    /// Model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The provider behind this relay.
    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    /// Start a turn against `log_text`.
    ///
    /// Empty log text short-circuits to [`RelayReply::MissingContext`]
    /// without touching the model. Otherwise the returned stream sends the
    /// request on first poll; dropping it before the end abandons the turn
    /// and nothing is persisted.
    pub fn respond(&self, log_text: &str, user_message: &str) -> RelayReply {
        if log_text.is_empty() {
            debug!("No log context; skipping inference");
            return RelayReply::MissingContext;
        }

        let request = build_chat_request(&self.model, log_text, user_message);
        info!(
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %self.model,
            log_bytes = log_text.len(),
            "Starting inference"
        );

        let events = self.provider.stream(request);
        let fragments = relay_fragments(events, Arc::clone(&self.transcript), self.model.clone());
        RelayReply::Streaming(Box::pin(fragments))
    }
}

/// Forward text fragments as they arrive and persist the reply on success.
///
/// A provider error is yielded once and ends the stream; the reply is only
/// appended after a `Done` event or a clean end of the event stream.
fn relay_fragments<R: TranscriptRepository + 'static>(
    mut events: EventStream,
    transcript: Arc<R>,
    model: String,
) -> impl Stream<Item = Result<String, RelayError>> + Send + 'static {
    async_stream::try_stream! {
        let started = Instant::now();
        let mut reply = ReplyAccumulator::new();
        let mut input_tokens: u32 = 0;
        let mut output_tokens: u32 = 0;

        while let Some(event) = events.next().await {
            let event = event.inspect_err(|e| {
                warn!(
                    gen_ai.request.model = %model,
                    fragments = reply.fragments(),
                    error = %e,
                    "Inference stream failed; reply will not be saved"
                );
            })?;

            match event {
                StreamEvent::TextDelta { text } => {
                    if text.is_empty() {
                        continue;
                    }
                    reply.push(&text);
                    yield text;
                }
                StreamEvent::Usage(usage) => {
                    input_tokens = usage.input_tokens;
                    output_tokens = usage.output_tokens;
                }
                StreamEvent::Done => break,
                StreamEvent::Connected => {
                    debug!(gen_ai.request.model = %model, "Inference stream connected");
                }
            }
        }

        let fragments = reply.fragments();
        let content = reply.finish();
        let turn = transcript
            .append(TurnRole::Assistant, &content)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to save assistant reply"))?;

        info!(
            turn_id = turn.id,
            fragments,
            gen_ai.usage.input_tokens = input_tokens,
            gen_ai.usage.output_tokens = output_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Assistant reply saved"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::FragmentStream;
    use crate::testing::{InMemoryTranscript, ScriptedProvider};
    use loglens_types::llm::MessageRole;

    fn relay_with(
        provider: ScriptedProvider,
    ) -> (InferenceRelay<InMemoryTranscript>, Arc<InMemoryTranscript>) {
        let transcript = Arc::new(InMemoryTranscript::default());
        let relay = InferenceRelay::new(
            BoxLlmProvider::new(provider),
            Arc::clone(&transcript),
            "mistral",
        );
        (relay, transcript)
    }

    fn expect_stream(reply: RelayReply) -> FragmentStream {
        match reply {
            RelayReply::Streaming(stream) => stream,
            RelayReply::MissingContext => panic!("expected a streaming reply"),
        }
    }

    /// Drain a fragment stream, returning the fragments seen before the first error.
    async fn drain(mut stream: FragmentStream) -> (Vec<String>, Option<RelayError>) {
        let mut fragments = Vec::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(fragment) => fragments.push(fragment),
                Err(e) => return (fragments, Some(e)),
            }
        }
        (fragments, None)
    }

    #[tokio::test]
    async fn test_empty_log_short_circuits() {
        let provider = ScriptedProvider::new(["never"]);
        let requests = provider.requests();
        let (relay, transcript) = relay_with(provider);

        let reply = relay.respond("", "what failed?");
        assert!(reply.is_missing_context());
        assert!(requests.lock().unwrap().is_empty());
        assert!(transcript.turns().is_empty());
    }

    #[tokio::test]
    async fn test_streams_fragments_and_persists_reply() {
        let provider = ScriptedProvider::new(["It ", "looks ", "like ", "an error."]);
        let (relay, transcript) = relay_with(provider);

        let stream = expect_stream(relay.respond("ERROR at 10:02\nWARN at 10:05", "what failed?"));
        let (fragments, error) = drain(stream).await;

        assert!(error.is_none());
        assert_eq!(fragments, vec!["It ", "looks ", "like ", "an error."]);

        let turns = transcript.turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, TurnRole::Assistant);
        assert_eq!(turns[0].content, "It looks like an error.");
    }

    #[tokio::test]
    async fn test_request_carries_system_prompt_logs_and_question() {
        let provider = ScriptedProvider::new(["ok"]);
        let requests = provider.requests();
        let (relay, _transcript) = relay_with(provider);

        let stream = expect_stream(relay.respond("WARN at 10:05", "any warnings?"));
        drain(stream).await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "mistral");
        assert!(request.stream);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(
            request.messages[1].content,
            "Logs:\nWARN at 10:05\n\nUser request: any warnings?"
        );
    }

    #[tokio::test]
    async fn test_mid_stream_failure_keeps_sent_fragments_and_skips_persist() {
        let provider = ScriptedProvider::new(["It ", "looks ", "like ", "an error."]).failing_at(2);
        let (relay, transcript) = relay_with(provider);

        let stream = expect_stream(relay.respond("ERROR", "what failed?"));
        let (fragments, error) = drain(stream).await;

        assert_eq!(fragments, vec!["It ", "looks "]);
        assert!(matches!(error, Some(RelayError::Llm(_))));
        assert!(transcript.turns().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_stream_persists_nothing() {
        let provider = ScriptedProvider::new(["It ", "looks ", "like ", "an error."]);
        let (relay, transcript) = relay_with(provider);

        let mut stream = expect_stream(relay.respond("ERROR", "what failed?"));
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first, "It ");
        drop(stream);

        assert!(transcript.turns().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_yielded_after_fragments() {
        let provider = ScriptedProvider::new(["partial ", "answer"]);
        let (relay, transcript) = relay_with(provider);
        transcript.set_failing(true);

        let stream = expect_stream(relay.respond("ERROR", "what failed?"));
        let (fragments, error) = drain(stream).await;

        assert_eq!(fragments, vec!["partial ", "answer"]);
        assert!(matches!(error, Some(RelayError::Repository(_))));
    }

    #[tokio::test]
    async fn test_empty_reply_is_still_persisted() {
        let provider = ScriptedProvider::new(Vec::<String>::new());
        let (relay, transcript) = relay_with(provider);

        let stream = expect_stream(relay.respond("ERROR", "anything?"));
        let (fragments, error) = drain(stream).await;

        assert!(fragments.is_empty());
        assert!(error.is_none());
        let turns = transcript.turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "");
    }

    #[tokio::test]
    async fn test_concurrent_turns_do_not_interleave() {
        let (relay_a, transcript) = relay_with(ScriptedProvider::new(["a1 ", "a2 ", "a3"]));
        let relay_b = InferenceRelay::new(
            BoxLlmProvider::new(ScriptedProvider::new(["b1 ", "b2 ", "b3"])),
            Arc::clone(&transcript),
            "mistral",
        );

        let stream_a = expect_stream(relay_a.respond("log", "a?"));
        let stream_b = expect_stream(relay_b.respond("log", "b?"));
        let ((a, err_a), (b, err_b)) = tokio::join!(drain(stream_a), drain(stream_b));

        assert!(err_a.is_none() && err_b.is_none());
        assert_eq!(a.concat(), "a1 a2 a3");
        assert_eq!(b.concat(), "b1 b2 b3");

        let mut saved: Vec<String> = transcript.turns().into_iter().map(|t| t.content).collect();
        saved.sort();
        assert_eq!(saved, vec!["a1 a2 a3", "b1 b2 b3"]);
    }
}
