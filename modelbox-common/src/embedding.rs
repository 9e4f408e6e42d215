//! OpenAI-compatible embedding types.

use serde::{Deserialize, Serialize};

use crate::Usage;

/// OpenAI-compatible embedding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: EmbeddingInput,
    /// Accepted for OpenAI client compatibility; only float output is produced.
    #[serde(default)]
    pub encoding_format: Option<String>,
}

/// A single string or an ordered batch of strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// Normalize to a list: a single string becomes a one-element list.
    pub fn into_texts(self) -> Vec<String> {
        match self {
            EmbeddingInput::Single(text) => vec![text],
            EmbeddingInput::Batch(texts) => texts,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            EmbeddingInput::Single(text) => text.is_empty(),
            EmbeddingInput::Batch(texts) => texts.is_empty(),
        }
    }
}

/// OpenAI-compatible embedding response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub object: String,
    pub data: Vec<EmbeddingData>,
    pub model: String,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    pub object: String,
    pub embedding: Vec<f32>,
    pub index: usize,
}

impl EmbeddingResponse {
    /// Build a response from embeddings in input order.
    pub fn new(model: String, embeddings: Vec<Vec<f32>>) -> Self {
        let data = embeddings
            .into_iter()
            .enumerate()
            .map(|(index, embedding)| EmbeddingData {
                object: "embedding".to_string(),
                embedding,
                index,
            })
            .collect();
        Self {
            object: "list".to_string(),
            data,
            model,
            usage: Usage::default(),
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_input_deserializes() {
        let json = r#"{"model": "embed-small", "input": "hello"}"#;
        let req: EmbeddingRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(req.input, EmbeddingInput::Single(_)));
    }

    #[test]
    fn test_batch_input_deserializes() {
        let json = r#"{"model": "embed-small", "input": ["a", "b", "c"]}"#;
        let req: EmbeddingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.input.into_texts().len(), 3);
    }

    #[test]
    fn test_single_input_normalizes_to_one_element_list() {
        let input = EmbeddingInput::Single("hello".to_string());
        assert_eq!(input.into_texts(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_batch_order_preserved() {
        let input = EmbeddingInput::Batch(vec!["x".into(), "y".into(), "z".into()]);
        let texts = input.into_texts();
        assert_eq!(texts, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(EmbeddingInput::Single(String::new()).is_empty());
        assert!(EmbeddingInput::Batch(vec![]).is_empty());
        assert!(!EmbeddingInput::Single("a".into()).is_empty());
    }

    #[test]
    fn test_response_indexes_follow_input_order() {
        let response = EmbeddingResponse::new(
            "embed-small".to_string(),
            vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5, 0.6]],
        );
        assert_eq!(response.object, "list");
        assert_eq!(response.data.len(), 3);
        for (i, item) in response.data.iter().enumerate() {
            assert_eq!(item.index, i);
            assert_eq!(item.object, "embedding");
        }
        assert_eq!(response.data[1].embedding, vec![0.3, 0.4]);
    }
}
