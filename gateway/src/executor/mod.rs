//! Executor abstraction layer.
//!
//! The executor runs a model image with a serialized payload and hands back
//! raw output bytes. The gateway never looks inside the container runtime;
//! everything it needs is behind the [`Executor`] trait.

mod docker;

pub use docker::DockerExecutor;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

/// One container run: which image, what payload, what gets mounted.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Image reference to run.
    pub image: String,
    /// Serialized execution payload, passed as the container command.
    pub payload: String,
    /// Host directory mounted read-only at /models, if any.
    pub model_dir: Option<PathBuf>,
    /// Environment variables for the container.
    pub env: Vec<(String, String)>,
}

/// Facts about the container runtime, used by the health endpoint.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub default_runtime: String,
    pub runtimes: Vec<String>,
}

impl RuntimeInfo {
    /// Whether an NVIDIA runtime is registered or set as default.
    pub fn has_gpu(&self) -> bool {
        self.default_runtime.contains("nvidia")
            || self.runtimes.iter().any(|r| r.to_lowercase().contains("nvidia"))
    }
}

/// External capability that runs model containers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run an image to completion and return its stdout bytes.
    ///
    /// Blocks for the full container lifetime; there is no timeout. Callers
    /// must not hold any lock across this call.
    async fn run(&self, invocation: Invocation) -> Result<Vec<u8>>;

    /// Liveness probe against the container runtime.
    async fn ping(&self) -> Result<()>;

    /// Runtime facts for the accelerator probe.
    async fn runtime_info(&self) -> Result<RuntimeInfo>;
}
