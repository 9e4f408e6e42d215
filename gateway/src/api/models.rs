//! Models endpoint (OpenAI-compatible).

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::catalog::ModelConfig;
use crate::error::Result;
use crate::state::AppState;

/// Build the models router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/models", get(list_models))
}

/// OpenAI-compatible model list response.
#[derive(Debug, Serialize)]
struct ModelsResponse {
    object: &'static str,
    data: Vec<ModelData>,
}

#[derive(Debug, Serialize)]
struct ModelData {
    id: String,
    object: &'static str,
    created: i64,
    owned_by: &'static str,
    permission: Vec<serde_json::Value>,
    root: String,
    parent: Option<String>,
}

impl From<ModelConfig> for ModelData {
    fn from(model: ModelConfig) -> Self {
        Self {
            id: model.id.clone(),
            object: "model",
            created: chrono::Utc::now().timestamp(),
            owned_by: "modelbox",
            permission: Vec::new(),
            root: model.id,
            parent: None,
        }
    }
}

/// GET /v1/models - List available models.
async fn list_models(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ModelsResponse>> {
    let models = state.gateway.models(&headers)?;
    Ok(Json(ModelsResponse {
        object: "list",
        data: models.into_iter().map(ModelData::from).collect(),
    }))
}
