//! Health check endpoint.
//!
//! Aggregates a container-runtime liveness probe and a GPU availability
//! probe. The service is healthy exactly when the runtime probe succeeds;
//! GPU absence is reported but does not fail the check.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::executor::Executor;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub docker: ProbeReport,
    pub gpu: ProbeReport,
    pub api_version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub status: &'static str,
    pub message: String,
}

async fn check_runtime(executor: &dyn Executor) -> ProbeReport {
    match executor.ping().await {
        Ok(()) => ProbeReport {
            status: "healthy",
            message: "Container runtime is running".to_string(),
        },
        Err(e) => {
            tracing::error!("Container runtime health check failed: {}", e);
            ProbeReport {
                status: "unhealthy",
                message: e.to_string(),
            }
        }
    }
}

async fn check_gpu(executor: &dyn Executor) -> ProbeReport {
    match executor.runtime_info().await {
        Ok(info) if info.has_gpu() => ProbeReport {
            status: "available",
            message: "GPU support detected".to_string(),
        },
        Ok(_) => ProbeReport {
            status: "unavailable",
            message: "No GPU support detected".to_string(),
        },
        Err(e) => {
            tracing::error!("GPU check failed: {}", e);
            ProbeReport {
                status: "unknown",
                message: e.to_string(),
            }
        }
    }
}

/// GET /health - Aggregated health of the gateway and its dependencies.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let executor = state.gateway.executor();
    let docker = check_runtime(executor).await;
    let gpu = check_gpu(executor).await;

    let healthy = docker.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" },
        docker,
        gpu,
        api_version: env!("CARGO_PKG_VERSION"),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(response))
}
