//! Request-to-execution pipeline.
//!
//! Every entry operation runs the same stages in order: validate the request
//! shape, authenticate, admit through the rate limiter, resolve the model,
//! invoke the executor, and shape the result into the OpenAI wire schema.
//! The first failing stage short-circuits the rest; the endpoint counter and
//! duration observation are recorded on every path.

use std::sync::Arc;
use std::time::Instant;

use axum::http::HeaderMap;
use modelbox_common::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionRequest,
    CompletionResponse, EmbeddingRequest, EmbeddingResponse, ExecutionOutput, ExecutionPayload,
    ExecutionResult, ExecutionUsage, Usage,
};

use crate::auth::AuthGate;
use crate::catalog::{ModelCatalog, ModelConfig};
use crate::error::{Error, Result};
use crate::executor::{Executor, Invocation};
use crate::limit::RateLimiter;
use crate::metrics::Metrics;

pub const CHAT_ENDPOINT: &str = "chat_completions";
pub const COMPLETIONS_ENDPOINT: &str = "completions";
pub const EMBEDDINGS_ENDPOINT: &str = "embeddings";
pub const MODELS_ENDPOINT: &str = "models";

/// Orchestrates the request pipeline over the injected components.
pub struct Gateway {
    auth: AuthGate,
    limiter: RateLimiter,
    catalog: ModelCatalog,
    executor: Arc<dyn Executor>,
    metrics: Arc<Metrics>,
}

impl Gateway {
    pub fn new(
        auth: AuthGate,
        limiter: RateLimiter,
        catalog: ModelCatalog,
        executor: Arc<dyn Executor>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            auth,
            limiter,
            catalog,
            executor,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// OpenAI-compatible chat completion.
    pub async fn chat(
        &self,
        headers: &HeaderMap,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let start = Instant::now();
        let result = self.chat_inner(headers, request).await;
        self.metrics.record(CHAT_ENDPOINT, start.elapsed());
        result
    }

    async fn chat_inner(
        &self,
        headers: &HeaderMap,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        if request.messages.is_empty() {
            return Err(Error::InvalidRequest("messages must not be empty".to_string()));
        }
        validate_temperature(request.temperature)?;
        validate_max_tokens(request.max_tokens)?;

        let credential = self.auth.authenticate(headers)?;
        self.limiter.admit(&credential)?;
        let model = self.catalog.resolve(&request.model)?;

        if request.stream.unwrap_or(false) {
            tracing::debug!("stream=true requested; returning a complete response instead");
        }

        let payload = ExecutionPayload::text(
            flatten_messages(&request.messages),
            request.temperature.unwrap_or(model.default_temperature),
            request.max_tokens.unwrap_or(model.max_tokens),
        );
        let result = self.execute(model, &payload).await?;
        let text = match result.output {
            ExecutionOutput::Text(text) => text,
            ExecutionOutput::Embeddings(_) => {
                return Err(Error::ExecutionFailed(
                    "model returned embeddings for a chat request".to_string(),
                ))
            }
        };

        Ok(ChatCompletionResponse::new(
            model.id.clone(),
            ChatMessage::new("assistant", text.trim()),
            Some("stop".to_string()),
        )
        .with_usage(usage_from(result.usage)))
    }

    /// OpenAI-compatible text completion.
    pub async fn completion(
        &self,
        headers: &HeaderMap,
        request: CompletionRequest,
    ) -> Result<CompletionResponse> {
        let start = Instant::now();
        let result = self.completion_inner(headers, request).await;
        self.metrics.record(COMPLETIONS_ENDPOINT, start.elapsed());
        result
    }

    async fn completion_inner(
        &self,
        headers: &HeaderMap,
        request: CompletionRequest,
    ) -> Result<CompletionResponse> {
        if request.prompt.is_empty() {
            return Err(Error::InvalidRequest("prompt must not be empty".to_string()));
        }
        validate_temperature(request.temperature)?;
        validate_max_tokens(request.max_tokens)?;

        let credential = self.auth.authenticate(headers)?;
        self.limiter.admit(&credential)?;
        let model = self.catalog.resolve(&request.model)?;

        let payload = ExecutionPayload::text(
            request.prompt,
            request.temperature.unwrap_or(model.default_temperature),
            request.max_tokens.unwrap_or(model.max_tokens),
        );
        let result = self.execute(model, &payload).await?;
        let text = match result.output {
            ExecutionOutput::Text(text) => text,
            ExecutionOutput::Embeddings(_) => {
                return Err(Error::ExecutionFailed(
                    "model returned embeddings for a completion request".to_string(),
                ))
            }
        };

        Ok(CompletionResponse::new(
            model.id.clone(),
            text.trim().to_string(),
            Some("stop".to_string()),
        )
        .with_usage(usage_from(result.usage)))
    }

    /// OpenAI-compatible embeddings. The whole input batch goes to the
    /// executor in one invocation; the returned vectors are zipped back to
    /// inputs by position.
    pub async fn embeddings(
        &self,
        headers: &HeaderMap,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse> {
        let start = Instant::now();
        let result = self.embeddings_inner(headers, request).await;
        self.metrics.record(EMBEDDINGS_ENDPOINT, start.elapsed());
        result
    }

    async fn embeddings_inner(
        &self,
        headers: &HeaderMap,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse> {
        if request.input.is_empty() {
            return Err(Error::InvalidRequest("input must not be empty".to_string()));
        }

        let credential = self.auth.authenticate(headers)?;
        self.limiter.admit(&credential)?;
        let model = self.catalog.resolve(&request.model)?;

        let texts = request.input.into_texts();
        let payload = ExecutionPayload::texts(
            texts.clone(),
            model.default_temperature,
            model.max_tokens,
        );
        let result = self.execute(model, &payload).await?;
        let vectors = match result.output {
            ExecutionOutput::Embeddings(vectors) => vectors,
            ExecutionOutput::Text(_) => {
                return Err(Error::ExecutionFailed(
                    "model returned text for an embedding request".to_string(),
                ))
            }
        };

        if vectors.len() != texts.len() {
            return Err(Error::ExecutionFailed(format!(
                "embedding count mismatch: {} inputs, {} outputs",
                texts.len(),
                vectors.len()
            )));
        }

        Ok(EmbeddingResponse::new(model.id.clone(), vectors)
            .with_usage(usage_from(result.usage)))
    }

    /// List catalog models for the authenticated caller.
    pub fn models(&self, headers: &HeaderMap) -> Result<Vec<ModelConfig>> {
        let start = Instant::now();
        let result = self
            .auth
            .authenticate(headers)
            .map(|_| self.catalog.list().to_vec());
        self.metrics.record(MODELS_ENDPOINT, start.elapsed());
        result
    }

    async fn execute(&self, model: &ModelConfig, payload: &ExecutionPayload) -> Result<ExecutionResult> {
        let payload_json = serde_json::to_string(payload)
            .map_err(|e| Error::ExecutionFailed(format!("unserializable payload: {}", e)))?;

        let invocation = Invocation {
            image: model.image.clone(),
            payload: payload_json,
            model_dir: model.model_path.parent().map(|p| p.to_path_buf()),
            env: vec![("CUDA_VISIBLE_DEVICES".to_string(), "all".to_string())],
        };

        let stdout = self.executor.run(invocation).await?;
        serde_json::from_slice(&stdout)
            .map_err(|e| Error::ExecutionFailed(format!("unparseable model output: {}", e)))
    }
}

/// Flatten chat messages into the prompt text the model images expect,
/// one `role: content` line per message, order preserved.
fn flatten_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_temperature(temperature: Option<f32>) -> Result<()> {
    if let Some(t) = temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(Error::InvalidRequest(format!(
                "temperature must be between 0 and 2, got {}",
                t
            )));
        }
    }
    Ok(())
}

fn validate_max_tokens(max_tokens: Option<u32>) -> Result<()> {
    if max_tokens == Some(0) {
        return Err(Error::InvalidRequest(
            "max_tokens must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

fn usage_from(usage: Option<ExecutionUsage>) -> Usage {
    usage
        .map(|u| Usage::new(u.prompt_tokens, u.completion_tokens, u.total_tokens))
        .unwrap_or_default()
}
