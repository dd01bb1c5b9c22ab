use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

/// Lists the models visible to the configured Gemini key.
pub async fn list_models(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let models = state.models.list_models().await?;
    Ok(Json(models))
}
