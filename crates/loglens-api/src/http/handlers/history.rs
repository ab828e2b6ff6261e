//! GET /history

use axum::Json;
use axum::extract::State;

use loglens_types::chat::TurnView;

use crate::http::error::AppError;
use crate::state::AppState;

/// Every persisted turn as `[{role, content}]`, oldest first.
pub async fn get_history(State(state): State<AppState>) -> Result<Json<Vec<TurnView>>, AppError> {
    let turns = state.chat_service.history().await?;
    Ok(Json(turns.into_iter().map(TurnView::from).collect()))
}
