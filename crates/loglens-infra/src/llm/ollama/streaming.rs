//! Ollama NDJSON stream parser and async stream adapter.
//!
//! `/api/chat` with `"stream": true` answers with one JSON object per line:
//!
//! ```text
//! {"message":{"role":"assistant","content":"It "},"done":false}
//! {"message":{"role":"assistant","content":"looks"},"done":false}
//! {"message":{"role":"assistant","content":""},"done":true,"prompt_eval_count":26,"eval_count":2}
//! ```
//!
//! Lines may be split across body chunks, so bytes are buffered until a
//! full line is available.

use futures_util::StreamExt;

use loglens_core::llm::EventStream;
use loglens_types::llm::{LlmError, StreamEvent, Usage};

use super::types::{OllamaChatChunk, OllamaChatRequest, OllamaErrorBody};

/// Remove and return the next complete line (without its `\n`) from `buffer`.
///
/// Returns `None` if the buffer holds no newline yet.
fn take_line(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let pos = buffer.iter().position(|&b| b == b'\n')?;
    let mut line: Vec<u8> = buffer.drain(..=pos).collect();
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Some(line)
}

/// Convert one NDJSON line into zero or more `StreamEvent`s.
///
/// Blank lines yield nothing. A final `done` chunk yields `Usage` then `Done`.
fn parse_chunk_line(line: &[u8]) -> Result<Vec<StreamEvent>, LlmError> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let chunk: OllamaChatChunk = serde_json::from_slice(line)
        .map_err(|e| LlmError::Deserialization(format!("ollama chunk: {e}")))?;

    if let Some(message) = chunk.error {
        return Err(LlmError::Provider { message });
    }

    let mut events = Vec::new();
    if let Some(message) = chunk.message {
        if !message.content.is_empty() {
            events.push(StreamEvent::TextDelta {
                text: message.content,
            });
        }
    }

    if chunk.done {
        if let Some(reason) = chunk.done_reason.as_deref() {
            if reason != "stop" {
                tracing::debug!(done_reason = reason, "Ollama reply ended early");
            }
        }
        events.push(StreamEvent::Usage(Usage {
            input_tokens: chunk.prompt_eval_count.unwrap_or(0),
            output_tokens: chunk.eval_count.unwrap_or(0),
        }));
        events.push(StreamEvent::Done);
    }

    Ok(events)
}

/// Map a non-2xx `/api/chat` response to an `LlmError`.
fn status_error(status: reqwest::StatusCode, body: &str, model: &str) -> LlmError {
    let message = serde_json::from_str::<OllamaErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string());

    match status.as_u16() {
        404 => LlmError::ModelNotFound(model.to_string()),
        s if s >= 500 => LlmError::Provider {
            message: format!("Ollama server error HTTP {status}: {message}"),
        },
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {message}"),
        },
    }
}

/// Create a streaming connection to Ollama's `/api/chat`.
///
/// Sends the request on first poll, checks the response status, then reads
/// the NDJSON body line by line. A body that ends before a `done` chunk is
/// reported as a stream error.
pub fn create_ollama_stream(
    client: &reqwest::Client,
    url: &str,
    body: OllamaChatRequest,
) -> EventStream {
    let client = client.clone();
    let url = url.to_string();

    Box::pin(async_stream::try_stream! {
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        let response = if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_body, "Ollama chat API error response");
            Err(status_error(status, &error_body, &body.model))?;
            unreachable!()
        } else {
            response
        };

        yield StreamEvent::Connected;

        let mut byte_stream = response.bytes_stream();
        let mut buffer = Vec::new();
        let mut finished = false;

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = chunk_result
                .map_err(|e| LlmError::Stream(format!("response body read: {e}")))?;
            buffer.extend_from_slice(&chunk);

            while let Some(line) = take_line(&mut buffer) {
                for event in parse_chunk_line(&line)? {
                    finished |= matches!(event, StreamEvent::Done);
                    yield event;
                }
            }
            if finished {
                break;
            }
        }

        // Trailing line without a newline terminator.
        if !finished && !buffer.is_empty() {
            for event in parse_chunk_line(&buffer)? {
                finished |= matches!(event, StreamEvent::Done);
                yield event;
            }
        }

        if !finished {
            Err(LlmError::Stream("response ended before the reply was done".to_string()))?;
        }
    })
}
