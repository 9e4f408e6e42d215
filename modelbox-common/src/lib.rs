//! ModelBox Common Types
//!
//! Shared types used by the gateway: the OpenAI-compatible wire schema and
//! the gateway-executor execution protocol.

pub mod chat;
pub mod completion;
pub mod embedding;
pub mod protocol;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, Usage};
pub use completion::{CompletionChoice, CompletionRequest, CompletionResponse};
pub use embedding::{EmbeddingData, EmbeddingInput, EmbeddingRequest, EmbeddingResponse};
pub use protocol::{
    ExecutionOutput, ExecutionParameters, ExecutionPayload, ExecutionResult, ExecutionUsage,
    PayloadInput,
};
