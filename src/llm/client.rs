//! `ModelClient` trait, `TranslateError` taxonomy and the Gemini REST client.
//!
//! `GeminiClient` calls the Gemini `generateContent` endpoint
//! (`POST /v1beta/models/{model}:generateContent?key=…`) and returns the raw
//! completion text.  It performs exactly one outbound request per call — no
//! retries, no caching; retry policy belongs to the
//! [`Translator`](crate::llm::Translator).

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::GeminiConfig;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur while producing a translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The source text was empty (or whitespace only) after trimming.
    #[error("input text is empty")]
    EmptyInput,

    /// The API key is missing, or the endpoint rejected it.
    #[error("API key missing or rejected: {0}")]
    Authentication(String),

    /// Network / HTTP failure, including timeouts and non-2xx statuses.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The endpoint reported quota exhaustion (HTTP 429).
    #[error("rate limited by the model API")]
    RateLimited,

    /// The call succeeded but carried no usable completion text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The completion text could not be parsed into three styled variants.
    #[error("failed to parse model response: {0}")]
    MalformedResponse(String),
}

impl TranslateError {
    /// Whether the orchestrator may retry after this error.
    ///
    /// Authentication failures are a configuration problem — retrying cannot
    /// succeed — and empty input is a caller precondition.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TranslateError::Transport(_)
                | TranslateError::RateLimited
                | TranslateError::EmptyResponse
                | TranslateError::MalformedResponse(_)
        )
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Transport("request timed out".into())
        } else {
            TranslateError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ModelClient trait
// ---------------------------------------------------------------------------

/// Async trait for the remote text-generation call.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn ModelClient>`).  The orchestrator is generic
/// over this trait, which is what makes it testable with fake clients.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send `prompt` to the model and return the raw completion text.
    async fn generate(&self, prompt: &str) -> Result<String, TranslateError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Calls the Gemini `generateContent` REST endpoint.
///
/// All connection details (`base_url`, `api_key`, `model`, timeout) come
/// exclusively from the [`GeminiConfig`] passed to
/// [`GeminiClient::from_config`]; the credential is immutable thereafter.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a `GeminiClient` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`, so a hung connection resolves to
    /// [`TranslateError::Transport`] instead of blocking forever.  A default
    /// client is used as a last-resort fallback if the builder fails (should
    /// never happen in practice).
    pub fn from_config(config: &GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            api_key: config.resolved_api_key(),
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    /// Send `prompt` to the configured Gemini endpoint.
    ///
    /// Fails with [`TranslateError::Authentication`] before any request is
    /// sent when no API key is configured.
    async fn generate(&self, prompt: &str) -> Result<String, TranslateError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| TranslateError::Authentication("no API key configured".into()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let body = serde_json::json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "temperature": self.config.temperature
            }
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(TranslateError::Authentication(format!("HTTP {status}")));
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(TranslateError::RateLimited),
            s if !s.is_success() => {
                return Err(TranslateError::Transport(format!("HTTP {status}")));
            }
            _ => {}
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or(TranslateError::EmptyResponse)?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
