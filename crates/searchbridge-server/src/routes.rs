//! HTTP routes for the search service

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use searchbridge_core::{SearchBridgeError, SearchPipeline, SearchResponse, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SearchPipeline>,
}

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Natural language query
    pub query: String,

    /// Number of results to return
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

fn default_top_k() -> i64 {
    DEFAULT_TOP_K
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Run a natural-language search
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorBody>)> {
    match state.pipeline.search(&req.query, req.top_k).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let status = match &e {
                SearchBridgeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            if status.is_server_error() {
                error!("Search failed: {}", e);
            }
            Err((status, Json(ErrorBody {
                error: e.to_string(),
            })))
        }
    }
}

/// Liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", post(search))
        .with_state(state)
}
