//! Google Gemini API client implementation
//!
//! Implements the LlmClient trait for the Gemini `generateContent` endpoint.
//! One request per call; failures are returned to the caller as-is.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FinishReason, Generation, GenerationRequest, LlmClient, LlmError, TokenUsage};
use crate::config::LlmConfig;
use crate::credential::Credential;

/// Gemini API client
pub struct GeminiClient {
    model: String,
    credential: Credential,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from configuration and an already resolved credential
    pub fn from_config(config: &LlmConfig, credential: Credential) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            credential,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for the Gemini API
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, prompt_len = request.prompt.len(), "build_request_body: called");
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens.min(self.max_tokens),
            },
        })
    }

    /// Parse the Gemini API response
    fn parse_response(&self, api_response: GeminiResponse) -> Result<Generation, LlmError> {
        debug!(candidates = api_response.candidates.len(), "parse_response: called");
        if let Some(reason) = api_response.prompt_feedback.and_then(|f| f.block_reason) {
            debug!(%reason, "parse_response: prompt blocked");
            return Err(LlmError::Blocked { reason });
        }

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no candidates".to_string()))?;

        let finish_reason = candidate
            .finish_reason
            .as_deref()
            .map(FinishReason::from_gemini)
            .unwrap_or(FinishReason::Stop);

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            debug!(?finish_reason, "parse_response: candidate has no text");
            return Err(LlmError::InvalidResponse(format!(
                "Candidate contained no text (finish reason: {:?})",
                finish_reason
            )));
        }

        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(Generation {
            text,
            finish_reason,
            usage,
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Generation, LlmError> {
        debug!(%self.model, %request.max_tokens, "generate: called");
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.credential.expose())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "generate: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let api_response: GeminiResponse = response.json().await?;
        let generation = self.parse_response(api_response)?;
        if generation.finish_reason.is_truncated() {
            warn!(finish_reason = ?generation.finish_reason, "generate: output may be incomplete");
        }
        debug!(
            input_tokens = generation.usage.input_tokens,
            output_tokens = generation.usage.output_tokens,
            "generate: success"
        );
        Ok(generation)
    }
}

/// Extract `error.message` from a Gemini error body, falling back to the raw text
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// Gemini API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}
