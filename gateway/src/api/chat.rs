//! Chat completions endpoint (OpenAI-compatible).

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use modelbox_common::{ChatCompletionRequest, ChatCompletionResponse};

use crate::error::Result;
use crate::state::AppState;

/// Build the chat router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat/completions", post(chat_completions))
}

/// POST /v1/chat/completions - OpenAI-compatible chat completion.
async fn chat_completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ChatCompletionRequest>,
) -> Result<Json<ChatCompletionResponse>> {
    tracing::debug!("Chat completion request for model: {}", request.model);
    state.gateway.chat(&headers, request).await.map(Json)
}
