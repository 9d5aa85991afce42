//! LLM client module for landgen
//!
//! Provides the generation client trait and the Gemini implementation.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{FinishReason, Generation, GenerationRequest, TokenUsage};

use crate::config::LlmConfig;
use crate::credential::Credential;

/// Create an LLM client based on the provider specified in config
///
/// Supports the "gemini" provider.
pub fn create_client(config: &LlmConfig, credential: Credential) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config, credential)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::UnknownProvider(other.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_gemini() {
        let config = LlmConfig::default();
        let client = create_client(&config, Credential::new("test-key")).unwrap();
        assert_eq!(client.model(), "gemini-1.5-flash");
    }

    #[test]
    fn test_create_client_unknown_provider() {
        let config = LlmConfig {
            provider: "anthropic".to_string(),
            ..Default::default()
        };
        let result = create_client(&config, Credential::new("test-key"));
        assert!(matches!(result, Err(LlmError::UnknownProvider(ref p)) if p == "anthropic"));
    }
}
