//! POST /upload
//!
//! Replaces the log context with the multipart field `file`.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::debug;

use crate::http::error::AppError;
use crate::state::AppState;

/// Upload acknowledgement: `{"status":"ok","lines":N}`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub lines: usize,
}

pub async fn upload_log(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read multipart field: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read uploaded file: {e}")))?;

        debug!(file_name = %file_name, bytes = bytes.len(), "Received log upload");
        let summary = state.chat_service.upload_log(&bytes);

        return Ok(Json(UploadResponse {
            status: "ok",
            lines: summary.lines,
        }));
    }

    Err(AppError::Validation("missing form field 'file'".to_string()))
}
