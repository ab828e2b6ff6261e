//! Streaming chat endpoint.
//!
//! POST /chat (form field `message`)
//!
//! Responds with the model reply as a chunked `text/plain` body, one chunk
//! per fragment. Without an uploaded log the answer is the fixed JSON
//! `{"answer": "Please upload a log file first."}`.
//!
//! A failure after the first fragment cannot change the status line any
//! more; the body is aborted instead and the client sees a truncated reply.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tracing::Instrument;

use loglens_core::relay::{MISSING_CONTEXT_ANSWER, RelayReply};
use loglens_observe::genai_attrs;

use crate::http::error::AppError;
use crate::state::AppState;

/// Form body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    /// The user's question about the uploaded log.
    pub message: String,
}

pub async fn chat(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Response, AppError> {
    let relay = state.chat_service.relay();
    let span = tracing::info_span!(
        "chat",
        otel.name = %genai_attrs::chat_span_name(relay.model()),
        gen_ai.operation.name = genai_attrs::OP_CHAT,
        gen_ai.provider.name = %relay.provider().name(),
        gen_ai.request.model = %relay.model(),
    );

    let reply = state
        .chat_service
        .chat(&form.message)
        .instrument(span.clone())
        .await?;

    match reply {
        RelayReply::MissingContext => {
            Ok(Json(json!({ "answer": MISSING_CONTEXT_ANSWER })).into_response())
        }
        RelayReply::Streaming(fragments) => {
            let fragments = fragments.inspect(move |item| {
                if let Err(e) = item {
                    span.in_scope(|| tracing::error!(error = %e, "Chat reply stream aborted"));
                }
            });

            Ok((
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                Body::from_stream(fragments),
            )
                .into_response())
        }
    }
}
