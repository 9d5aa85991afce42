//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Prompt blocked by the model: {reason}")]
    Blocked { reason: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Unknown LLM provider: '{0}'. Supported: gemini")]
    UnknownProvider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LlmError::ApiError {
            status: 400,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "API error 400: API key not valid");

        let err = LlmError::UnknownProvider("openai".to_string());
        assert_eq!(err.to_string(), "Unknown LLM provider: 'openai'. Supported: gemini");

        let err = LlmError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Timeout after 30s");
    }
}
