//! LLM request/response types for landgen
//!
//! Provider-neutral shapes for a single text generation call. Provider clients
//! translate these to and from their own wire formats.

use tracing::debug;

/// A generation request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The fully composed prompt text
    pub prompt: String,

    /// Max tokens for response (from config)
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Result of a successful generation call
#[derive(Debug, Clone)]
pub struct Generation {
    /// Generated text, returned unmodified
    pub text: String,

    /// Why the model stopped
    pub finish_reason: FinishReason,

    /// Token usage reported by the provider
    pub usage: TokenUsage,
}

impl Generation {
    /// Create a generation carrying only text (used by stubs and tests)
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other(String),
}

impl FinishReason {
    /// Parse from Gemini API finishReason string
    pub fn from_gemini(s: &str) -> Self {
        debug!(%s, "FinishReason::from_gemini: called");
        match s {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            "RECITATION" => FinishReason::Recitation,
            other => {
                debug!(%other, "FinishReason::from_gemini: unrecognized reason");
                FinishReason::Other(other.to_string())
            }
        }
    }

    /// True when the output was cut short rather than finished naturally
    pub fn is_truncated(&self) -> bool {
        !matches!(self, FinishReason::Stop)
    }
}

/// Token usage for cost tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
