//! OpenAI-compatible HTTP API.

pub mod chat;
pub mod completions;
pub mod embeddings;
pub mod health;
pub mod metrics;
pub mod models;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Build the /v1 API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(chat::router())
        .merge(completions::router())
        .merge(embeddings::router())
        .merge(models::router())
}
