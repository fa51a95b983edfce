//! OpenAI-compatible chat-completions provider.
//!
//! Direct integration with the OpenAI Chat Completions API via `reqwest`.
//! Retriable failures (429, 5xx, transport) are retried with exponential
//! backoff; client errors are returned immediately. Once the boundary gives
//! up, the error is fatal for the run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llms::base_llm::{BaseLLM, BaseLLMState, LLMMessage};
use crate::utilities::errors::LLMError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: f64 = 120.0;

/// OpenAI chat-completions implementation.
///
/// Works against any endpoint speaking the chat-completions wire format via
/// a custom `base_url`.
///
/// # Example
///
/// ```ignore
/// let provider = OpenAICompletion::new("gpt-4o-mini", None, None);
/// let response = provider.call(messages)?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAICompletion {
    /// Shared base model state.
    #[serde(flatten)]
    pub state: BaseLLMState,

    /// Organization ID for multi-tenant access.
    pub organization: Option<String>,
    /// Request timeout in seconds.
    pub timeout: Option<f64>,
    /// Maximum number of retries.
    pub max_retries: u32,
    /// Maximum tokens in response.
    pub max_tokens: Option<u32>,
    /// Nucleus sampling parameter.
    pub top_p: Option<f64>,
    /// Seed for deterministic generation.
    pub seed: Option<i64>,
}

impl OpenAICompletion {
    /// Create a new OpenAI completion provider.
    ///
    /// # Arguments
    ///
    /// * `model` - OpenAI model name (e.g., "gpt-4o-mini").
    /// * `api_key` - Optional API key (defaults to OPENAI_API_KEY env var).
    /// * `base_url` - Optional custom base URL.
    pub fn new(
        model: impl Into<String>,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let api_key = api_key.or_else(|| std::env::var("OPENAI_API_KEY").ok());

        let mut state = BaseLLMState::new(model);
        state.api_key = api_key;
        state.base_url = base_url;
        state.provider = "openai".to_string();

        Self {
            state,
            organization: std::env::var("OPENAI_ORGANIZATION").ok(),
            timeout: None,
            max_retries: 2,
            max_tokens: None,
            top_p: None,
            seed: None,
        }
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> String {
        self.state
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
    }

    /// Build the request body for the Chat Completions API.
    pub fn build_request_body(&self, messages: &[LLMMessage]) -> Value {
        let mut body = serde_json::json!({
            "model": self.state.model,
            "messages": messages,
        });

        if let Some(temp) = self.state.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(top_p) = self.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }
        if let Some(seed) = self.seed {
            body["seed"] = serde_json::json!(seed);
        }
        if !self.state.stop.is_empty() {
            body["stop"] = serde_json::json!(self.state.stop);
        }

        body
    }

    /// Parse a Chat Completions API response into generated text.
    fn parse_completions_response(&self, response: &Value) -> Result<String, LLMError> {
        let message = response
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .ok_or_else(|| LLMError::InvalidResponse {
                provider: self.state.provider.clone(),
                reason: "no choices in response".to_string(),
            })?;

        let content = message
            .get("content")
            .and_then(|c| c.as_str())
            .unwrap_or("");

        // Stop sequences are also sent in the request body; this pass
        // truncates for endpoints that ignore them.
        let final_content = self.state.apply_stop_words(content);

        if let Some(usage) = response.get("usage") {
            log::debug!(
                "token usage: prompt={}, completion={}, total={}",
                usage.get("prompt_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("completion_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("total_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
            );
        }

        Ok(final_content)
    }
}

#[async_trait]
impl BaseLLM for OpenAICompletion {
    fn model(&self) -> &str {
        &self.state.model
    }

    fn stop(&self) -> &[String] {
        &self.state.stop
    }

    fn set_stop(&mut self, stop: Vec<String>) {
        self.state.stop = stop;
    }

    fn temperature(&self) -> Option<f64> {
        self.state.temperature
    }

    fn provider(&self) -> &str {
        "openai"
    }

    fn supports_stop_words(&self) -> bool {
        true
    }

    fn call(&self, messages: Vec<LLMMessage>) -> Result<String, LLMError> {
        log::debug!(
            "OpenAICompletion.call: model={}, messages={}",
            self.state.model,
            messages.len(),
        );

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| LLMError::Other(format!("failed to start runtime: {}", e)))?;
        rt.block_on(self.acall(messages))
    }

    async fn acall(&self, messages: Vec<LLMMessage>) -> Result<String, LLMError> {
        let api_key = self
            .state
            .api_key
            .as_ref()
            .ok_or_else(|| LLMError::MissingApiKey {
                provider: self.state.provider.clone(),
            })?;

        let messages = self.state.format_messages(messages)?;
        let body = self.build_request_body(&messages);
        let endpoint = format!("{}/chat/completions", self.api_base_url());

        let timeout_secs = self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs_f64(timeout_secs))
            .build()?;

        let mut last_error: Option<LLMError> = None;
        let mut retry_delay = std::time::Duration::from_secs(1);

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                log::warn!("API retry attempt {} after {:?}", attempt, retry_delay);
                tokio::time::sleep(retry_delay).await;
                retry_delay *= 2;
            }

            let mut request = client
                .post(&endpoint)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", api_key));

            if let Some(ref org) = self.organization {
                request = request.header("OpenAI-Organization", org);
            }

            let response = match request.json(&body).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = Some(LLMError::Transport(e));
                    continue;
                }
            };

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                last_error = Some(LLMError::Api {
                    provider: self.state.provider.clone(),
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                });
                continue;
            }

            let response_text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    last_error = Some(LLMError::Transport(e));
                    continue;
                }
            };

            if status.is_client_error() {
                return Err(LLMError::Api {
                    provider: self.state.provider.clone(),
                    status: status.as_u16(),
                    body: response_text,
                });
            }

            let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
                LLMError::InvalidResponse {
                    provider: self.state.provider.clone(),
                    reason: format!(
                        "{} - body: {}",
                        e,
                        &response_text[..response_text.len().min(500)]
                    ),
                }
            })?;

            return self.parse_completions_response(&response_json);
        }

        Err(LLMError::RetriesExhausted {
            provider: self.state.provider.clone(),
            attempts: self.max_retries + 1,
            reason: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }
}
