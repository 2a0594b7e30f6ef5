//! Judge0 HTTP client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::JudgeConfig,
    error::{AppError, AppResult},
};

/// One queued execution request in a batch submission
#[derive(Debug, Clone, Serialize)]
pub struct BatchSubmission {
    pub source_code: String,
    pub language_id: i64,
    pub stdin: String,
}

/// Execution status reported by Judge0 (1 = In Queue, 2 = Processing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeStatus {
    pub id: i64,
    pub description: String,
}

/// One execution record, keyed by token, as returned from a batch status fetch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JudgeRecord {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub status: Option<JudgeStatus>,
    /// Peak memory in kilobytes
    #[serde(default)]
    pub memory: Option<f64>,
    /// Wall time in seconds, as reported
    #[serde(default)]
    pub time: Option<String>,
}

impl JudgeRecord {
    /// A record is terminal once it has left the queued/running states.
    pub fn is_terminal(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.id > 2)
    }

    /// Status text for display, falling back to "Unknown"
    pub fn status_text(&self) -> String {
        self.status
            .as_ref()
            .map(|s| s.description.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Seam over the external judge, mockable in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Submit a batch of executions, returning one opaque token per entry
    async fn submit_batch(&self, submissions: &[BatchSubmission]) -> AppResult<Vec<String>>;

    /// Fetch the current record for each token, in token order
    async fn fetch_batch(&self, tokens: &[String]) -> AppResult<Vec<JudgeRecord>>;
}

/// Judge0 client over HTTP
#[derive(Clone)]
pub struct Judge0Client {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    submissions: &'a [BatchSubmission],
}

#[derive(Deserialize)]
struct TokenEntry {
    token: String,
}

#[derive(Deserialize)]
struct BatchStatusResponse {
    submissions: Vec<JudgeRecord>,
}

impl Judge0Client {
    pub fn new(config: &JudgeConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Judge(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl JudgeBackend for Judge0Client {
    async fn submit_batch(&self, submissions: &[BatchSubmission]) -> AppResult<Vec<String>> {
        let url = format!("{}/submissions/batch?base64_encoded=false", self.base_url);

        debug!(count = submissions.len(), "Submitting batch to Judge0");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&BatchRequest { submissions })
            .send()
            .await
            .map_err(|e| AppError::Judge(format!("Batch submit failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Judge(format!(
                "Judge0 returned HTTP {status}: {body}"
            )));
        }

        let entries: Vec<TokenEntry> = response
            .json()
            .await
            .map_err(|e| AppError::Judge(format!("Invalid batch submit response: {e}")))?;

        Ok(entries.into_iter().map(|e| e.token).collect())
    }

    async fn fetch_batch(&self, tokens: &[String]) -> AppResult<Vec<JudgeRecord>> {
        let url = format!(
            "{}/submissions/batch?tokens={}&base64_encoded=false&fields=token,stdout,stderr,compile_output,status,memory,time",
            self.base_url,
            tokens.join(",")
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Judge(format!("Batch status fetch failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Judge(format!("Judge0 returned HTTP {status}")));
        }

        let body: BatchStatusResponse = response
            .json()
            .await
            .map_err(|e| AppError::Judge(format!("Invalid batch status response: {e}")))?;

        Ok(body.submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_status(id: i64) -> JudgeRecord {
        JudgeRecord {
            status: Some(JudgeStatus {
                id,
                description: "test".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!record_with_status(1).is_terminal()); // In Queue
        assert!(!record_with_status(2).is_terminal()); // Processing
        assert!(record_with_status(3).is_terminal()); // Accepted
        assert!(record_with_status(6).is_terminal()); // Compilation Error
        assert!(!JudgeRecord::default().is_terminal()); // No status yet
    }

    #[test]
    fn test_status_text_fallback() {
        assert_eq!(JudgeRecord::default().status_text(), "Unknown");
        assert_eq!(record_with_status(3).status_text(), "test");
    }
}
