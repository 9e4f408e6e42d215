//! Docker-backed executor.
//!
//! Each invocation shells out to `docker run --rm` and waits for the
//! container to exit. Model weights are mounted read-only at /models.

use std::collections::HashMap;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{Executor, Invocation, RuntimeInfo};
use crate::error::{Error, Result};

pub struct DockerExecutor {
    binary: String,
}

impl DockerExecutor {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

/// Subset of `docker info` output needed for the accelerator probe.
#[derive(Debug, Deserialize)]
struct DockerInfo {
    #[serde(rename = "DefaultRuntime", default)]
    default_runtime: String,
    #[serde(rename = "Runtimes", default)]
    runtimes: HashMap<String, serde_json::Value>,
}

#[async_trait]
impl Executor for DockerExecutor {
    async fn run(&self, invocation: Invocation) -> Result<Vec<u8>> {
        let mut command = Command::new(&self.binary);
        command.arg("run").arg("--rm");

        if let Some(ref model_dir) = invocation.model_dir {
            command
                .arg("-v")
                .arg(format!("{}:/models:ro", model_dir.display()));
        }
        for (key, value) in &invocation.env {
            command.arg("-e").arg(format!("{}={}", key, value));
        }
        command.arg(&invocation.image).arg(&invocation.payload);
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        tracing::debug!("Running container image {}", invocation.image);

        let output = command
            .output()
            .await
            .map_err(|e| Error::ExecutionFailed(format!("failed to invoke {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ExecutionFailed(format!(
                "container for {} exited with {}: {}",
                invocation.image,
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }

    async fn ping(&self) -> Result<()> {
        let output = Command::new(&self.binary)
            .arg("version")
            .arg("--format")
            .arg("{{.Server.Version}}")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::ExecutionFailed(format!("failed to invoke {}: {}", self.binary, e)))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Error::ExecutionFailed(format!(
                "container runtime unreachable: {}",
                stderr.trim()
            )))
        }
    }

    async fn runtime_info(&self) -> Result<RuntimeInfo> {
        let output = Command::new(&self.binary)
            .arg("info")
            .arg("--format")
            .arg("{{json .}}")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::ExecutionFailed(format!("failed to invoke {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ExecutionFailed(format!(
                "container runtime info unavailable: {}",
                stderr.trim()
            )));
        }

        let info: DockerInfo = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::ExecutionFailed(format!("unparseable runtime info: {}", e)))?;

        Ok(RuntimeInfo {
            default_runtime: info.default_runtime,
            runtimes: info.runtimes.into_keys().collect(),
        })
    }
}
