//! ModelBox gateway - OpenAI-compatible API over ephemeral model containers.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use modelbox_gateway::{
    api, AppState, AuthGate, Config, DockerExecutor, Gateway, Metrics, ModelCatalog, RateLimiter,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Make sure config.toml exists or set GATEWAY__SECTION__KEY environment variables.",
            e
        )
    })?;

    tracing::info!("Starting ModelBox gateway");

    // Initialize components
    let executor = Arc::new(DockerExecutor::new(&config.docker.binary));
    let catalog = ModelCatalog::load(&config.catalog.path);
    let metrics = Arc::new(Metrics::new()?);
    let gateway = Gateway::new(
        AuthGate::new(&config.auth.api_key),
        RateLimiter::new(&config.rate_limit),
        catalog,
        executor,
        metrics,
    );

    let state = Arc::new(AppState::new(config.clone(), gateway));

    // Build router
    let app = Router::new()
        .nest("/v1", api::router())
        .route("/health", get(api::health::health))
        .route("/metrics", get(api::metrics::metrics))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.api.host, config.api.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
