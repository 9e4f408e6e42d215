//! ModelBox gateway library.
//!
//! Exposes an OpenAI-compatible HTTP API and runs each request in an
//! ephemeral model container through the [`executor::Executor`] capability.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod limit;
pub mod metrics;
pub mod state;

pub use auth::AuthGate;
pub use catalog::{ModelCatalog, ModelConfig};
pub use config::Config;
pub use dispatch::Gateway;
pub use error::{Error, Result};
pub use executor::{DockerExecutor, Executor, Invocation, RuntimeInfo};
pub use limit::RateLimiter;
pub use metrics::Metrics;
pub use state::AppState;
