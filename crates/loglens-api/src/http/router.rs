//! Axum router configuration with middleware.
//!
//! Routes: `/upload`, `/chat`, `/history`, `/health`.
//! Middleware: CORS (any origin, method, header), request tracing, and an
//! upload body limit taken from `[server] max_upload_mb`.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state.config.server.max_upload_mb.saturating_mul(1024 * 1024);

    Router::new()
        .route(
            "/upload",
            post(handlers::upload::upload_log).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/chat", post(handlers::chat::chat))
        .route("/history", get(handlers::history::get_history))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
