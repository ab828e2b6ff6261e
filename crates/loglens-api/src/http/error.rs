//! Application error type mapping to HTTP status codes.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use loglens_core::relay::RelayError;
use loglens_types::error::RepositoryError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or incomplete request.
    Validation(String),
    /// Transcript store failure.
    Repository(RepositoryError),
    /// Failure before the reply stream started.
    Relay(RelayError),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Repository(e) => AppError::Repository(e),
            other => AppError::Relay(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Repository(e) => {
                tracing::error!(error = %e, "Transcript store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::Relay(e) => {
                tracing::error!(error = %e, "Chat relay failure");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_422() {
        let response =
            AppError::Validation("missing form field 'file'".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({"detail": "missing form field 'file'"})
        );
    }

    #[tokio::test]
    async fn test_repository_error_maps_to_500() {
        let err: AppError =
            RelayError::Repository(RepositoryError::Query("disk I/O error".into())).into();
        assert!(matches!(err, AppError::Repository(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("disk I/O error"));
    }
}
