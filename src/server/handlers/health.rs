use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

pub async fn health(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "initialized": true
    }))
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let indexed_documents = state.store.count().await.unwrap_or(0);
    let total_messages = state.history.total_turns().await;
    let llm_reachable = state.llm.health_check().await.unwrap_or(false);

    Ok(Json(json!({
        "initialized": true,
        "provider": state.llm.name(),
        "llm_reachable": llm_reachable,
        "indexed_documents": indexed_documents,
        "total_messages": total_messages,
        "collection": state.settings.collection_name,
    })))
}
