//! LlmClient trait definition

use async_trait::async_trait;

use super::{Generation, GenerationRequest, LlmError};

/// Stateless LLM client - each call is independent
///
/// The pipeline only needs "prompt in, text out", so this trait stays narrow.
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier this client sends requests to
    fn model(&self) -> &str;

    /// Send a single generation request and wait for the full response
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, LlmError>;
}
