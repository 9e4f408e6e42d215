//! Execution protocol between the gateway and model containers.
//!
//! This module defines the JSON wire contract used to invoke a model image
//! and to read its result back. It is versioned independently of the HTTP
//! API: this is version 1.
//!
//! # Invocation
//!
//! The gateway serializes an [`ExecutionPayload`] and passes it as the
//! container command. The container writes a single JSON-encoded
//! [`ExecutionResult`] to stdout and exits.
//!
//! ```json
//! {"input": "user: Hello", "parameters": {"temperature": 0.7, "max_tokens": 256}}
//! ```
//!
//! For embeddings the input is an ordered list of strings and the output is
//! a parallel list of vectors, one per input, in the same order.

use serde::{Deserialize, Serialize};

/// Payload handed to a model container as its command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPayload {
    pub input: PayloadInput,
    pub parameters: ExecutionParameters,
}

/// Input to a container run: flattened prompt text, or a batch of texts to embed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadInput {
    Text(String),
    Texts(Vec<String>),
}

/// Sampling parameters forwarded to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParameters {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ExecutionPayload {
    pub fn text(input: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            input: PayloadInput::Text(input.into()),
            parameters: ExecutionParameters {
                temperature,
                max_tokens,
            },
        }
    }

    pub fn texts(inputs: Vec<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            input: PayloadInput::Texts(inputs),
            parameters: ExecutionParameters {
                temperature,
                max_tokens,
            },
        }
    }
}

/// Result read back from a container's stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: ExecutionOutput,
    #[serde(default)]
    pub usage: Option<ExecutionUsage>,
}

/// Output of a container run: generated text, or one vector per input text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionOutput {
    Text(String),
    Embeddings(Vec<Vec<f32>>),
}

/// Token counts reported by the container. Every field defaults to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExecutionUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let payload = ExecutionPayload::text("user: Hello", 0.7, 256);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""input":"user: Hello""#));
        assert!(json.contains(r#""temperature":0.7"#));
        assert!(json.contains(r#""max_tokens":256"#));
    }

    #[test]
    fn test_batch_payload_serializes_as_list() {
        let payload = ExecutionPayload::texts(vec!["a".into(), "b".into()], 0.0, 1);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""input":["a","b"]"#));
    }

    #[test]
    fn test_text_result_parses() {
        let json = r#"{"output": "Hello there", "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5}}"#;
        let result: ExecutionResult = serde_json::from_str(json).unwrap();
        match result.output {
            ExecutionOutput::Text(text) => assert_eq!(text, "Hello there"),
            other => panic!("expected text output, got {:?}", other),
        }
        assert_eq!(result.usage.unwrap().total_tokens, 5);
    }

    #[test]
    fn test_embedding_result_parses() {
        let json = r#"{"output": [[0.1, 0.2], [0.3, 0.4]]}"#;
        let result: ExecutionResult = serde_json::from_str(json).unwrap();
        match result.output {
            ExecutionOutput::Embeddings(vectors) => {
                assert_eq!(vectors.len(), 2);
                assert_eq!(vectors[0], vec![0.1, 0.2]);
            }
            other => panic!("expected embeddings output, got {:?}", other),
        }
        assert!(result.usage.is_none());
    }

    #[test]
    fn test_usage_fields_default_to_zero() {
        let json = r#"{"output": "x", "usage": {"prompt_tokens": 7}}"#;
        let result: ExecutionResult = serde_json::from_str(json).unwrap();
        let usage = result.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 7);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(usage.total_tokens, 0);
    }

    #[test]
    fn test_garbage_output_is_rejected() {
        let result: Result<ExecutionResult, _> = serde_json::from_str("not json at all");
        assert!(result.is_err());
    }
}
