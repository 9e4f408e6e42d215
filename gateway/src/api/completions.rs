//! Text completions endpoint (OpenAI-compatible).

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use modelbox_common::{CompletionRequest, CompletionResponse};

use crate::error::Result;
use crate::state::AppState;

/// Build the completions router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/completions", post(completions))
}

/// POST /v1/completions - OpenAI-compatible text completion.
async fn completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>> {
    tracing::debug!("Completion request for model: {}", request.model);
    state.gateway.completion(&headers, request).await.map(Json)
}
