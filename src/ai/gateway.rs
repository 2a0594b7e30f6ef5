//! Gemini client
//!
//! One buffered call path and one streaming call path, both with fixed
//! generation parameters and maximally permissive safety thresholds.
//! Upstream failure modes are normalized into [`AiError`] variants with
//! human-readable messages; the key is never logged.

use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AiConfig;
use crate::constants::{GEMINI_REQUEST_TIMEOUT_SECS, GEMINI_STREAM_TIMEOUT_SECS};

/// Normalized failure conditions from the generative model API
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Content blocked: {0}")]
    Blocked(String),

    #[error("Response blocked by safety filters")]
    SafetyFiltered,

    #[error("Response truncated due to length. Try a shorter prompt")]
    Truncated,

    #[error("No text in model response")]
    Empty,

    #[error("Invalid request to the model API")]
    InvalidRequest,

    #[error("Rate limit exceeded. Please try again in a few minutes")]
    RateLimited,

    #[error("Model API server error. Please try again")]
    UpstreamServer,

    #[error("Request timed out. The prompt may be too long")]
    Timeout,

    #[error("AI service error: {0}")]
    Transport(String),
}

/// Model quality tier selected per call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Fast and cheap; hints, debugging, chat, recommendations
    Flash,
    /// Higher quality; solution explanations
    Pro,
}

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    flash_model: String,
    pro_model: String,
}

// --- Wire DTOs ---

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

fn request_body(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 4096,
        },
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|category| SafetySetting {
                category,
                threshold: "BLOCK_NONE",
            })
            .collect(),
    }
}

/// Classify a successful transport response that carried no text
pub(crate) fn classify_empty_response(response: &GenerateResponse) -> AiError {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return AiError::Blocked(reason.clone());
        }
    }

    match response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
    {
        Some("SAFETY") => AiError::SafetyFiltered,
        Some("MAX_TOKENS") => AiError::Truncated,
        _ => AiError::Empty,
    }
}

/// Reclassify an HTTP error status from the model API
pub(crate) fn classify_status(status: StatusCode) -> AiError {
    match status {
        StatusCode::BAD_REQUEST => AiError::InvalidRequest,
        StatusCode::TOO_MANY_REQUESTS => AiError::RateLimited,
        s if s.is_server_error() => AiError::UpstreamServer,
        s => AiError::Transport(format!("HTTP {s}")),
    }
}

fn classify_transport(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Timeout
    } else {
        AiError::Transport(err.to_string())
    }
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AiError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            flash_model: config.flash_model.clone(),
            pro_model: config.pro_model.clone(),
        })
    }

    fn model_name(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Flash => &self.flash_model,
            ModelTier::Pro => &self.pro_model,
        }
    }

    /// Buffered generation: send the prompt, return the complete text.
    pub async fn generate(&self, prompt: &str, tier: ModelTier) -> Result<String, AiError> {
        let model = self.model_name(tier);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        debug!(model, prompt_len = prompt.len(), "Calling Gemini API");

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(GEMINI_REQUEST_TIMEOUT_SECS))
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(classify_transport)?;

        if !response.status().is_success() {
            return Err(classify_status(response.status()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Transport(format!("Invalid response body: {e}")))?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.clone());

        match text {
            Some(text) if !text.is_empty() => {
                info!(model, response_len = text.len(), "Gemini response received");
                Ok(text)
            }
            _ => Err(classify_empty_response(&body)),
        }
    }

    /// Streaming generation: returns the raw upstream SSE byte stream.
    pub async fn generate_stream(
        &self,
        prompt: &str,
        tier: ModelTier,
    ) -> Result<impl Stream<Item = Result<Bytes, reqwest::Error>> + use<>, AiError> {
        let model = self.model_name(tier);
        let url = format!(
            "{}/models/{}:streamGenerateContent?key={}&alt=sse",
            self.base_url, model, self.api_key
        );

        debug!(model, prompt_len = prompt.len(), "Streaming from Gemini API");

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(GEMINI_STREAM_TIMEOUT_SECS))
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(classify_transport)?;

        if !response.status().is_success() {
            return Err(classify_status(response.status()));
        }

        Ok(response.bytes_stream())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blocked_prompt() {
        let response = GenerateResponse {
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("PROHIBITED_CONTENT".to_string()),
            }),
            ..Default::default()
        };
        assert!(matches!(
            classify_empty_response(&response),
            AiError::Blocked(reason) if reason == "PROHIBITED_CONTENT"
        ));
    }

    #[test]
    fn test_classify_safety_finish() {
        let response = GenerateResponse {
            candidates: vec![Candidate {
                finish_reason: Some("SAFETY".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            classify_empty_response(&response),
            AiError::SafetyFiltered
        ));
    }

    #[test]
    fn test_classify_truncated() {
        let response = GenerateResponse {
            candidates: vec![Candidate {
                finish_reason: Some("MAX_TOKENS".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            classify_empty_response(&response),
            AiError::Truncated
        ));
    }

    #[test]
    fn test_classify_unknown_empty() {
        assert!(matches!(
            classify_empty_response(&GenerateResponse::default()),
            AiError::Empty
        ));
    }

    #[test]
    fn test_classify_status_codes() {
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST),
            AiError::InvalidRequest
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            AiError::RateLimited
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            AiError::UpstreamServer
        ));
        assert!(matches!(
            classify_status(StatusCode::IM_A_TEAPOT),
            AiError::Transport(_)
        ));
    }
}
