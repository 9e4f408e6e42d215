//! Embeddings endpoint (OpenAI-compatible).

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use modelbox_common::{EmbeddingRequest, EmbeddingResponse};

use crate::error::Result;
use crate::state::AppState;

/// Build the embeddings router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/embeddings", post(embeddings))
}

/// POST /v1/embeddings - OpenAI-compatible embeddings.
async fn embeddings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<EmbeddingRequest>,
) -> Result<Json<EmbeddingResponse>> {
    tracing::debug!("Embedding request for model: {}", request.model);
    state.gateway.embeddings(&headers, request).await.map(Json)
}
