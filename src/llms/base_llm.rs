//! Model-call boundary.
//!
//! The loop treats the language model as a black-box function from an
//! ordered conversation plus stop sequences to generated text. Failures at
//! this boundary have no recovery path and terminate the run.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utilities::errors::LLMError;

// ---------------------------------------------------------------------------
// LLM Message type alias
// ---------------------------------------------------------------------------

/// A single message in a model conversation, with `role` and `content` keys.
pub type LLMMessage = HashMap<String, Value>;

/// Build a message with the given role and content.
pub fn message(role: &str, content: &str) -> LLMMessage {
    let mut msg = HashMap::new();
    msg.insert("role".to_string(), Value::String(role.to_string()));
    msg.insert("content".to_string(), Value::String(content.to_string()));
    msg
}

/// Build a system message.
pub fn system_message(content: &str) -> LLMMessage {
    message("system", content)
}

/// Build a user message.
pub fn user_message(content: &str) -> LLMMessage {
    message("user", content)
}

/// Build an assistant message.
pub fn assistant_message(content: &str) -> LLMMessage {
    message("assistant", content)
}

// ---------------------------------------------------------------------------
// BaseLLM trait
// ---------------------------------------------------------------------------

/// Abstract base trait for model implementations.
///
/// Implementations should handle provider error cases themselves (timeouts,
/// malformed responses) and surface anything unrecoverable as [`LLMError`].
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// Get the model identifier/name.
    fn model(&self) -> &str;

    /// Get the stop sequences.
    fn stop(&self) -> &[String];

    /// Set the stop sequences.
    fn set_stop(&mut self, stop: Vec<String>);

    /// Get the optional temperature setting.
    fn temperature(&self) -> Option<f64> {
        None
    }

    /// Get the provider name.
    fn provider(&self) -> &str {
        "openai"
    }

    /// Request one completion for the conversation (synchronous).
    ///
    /// This is the loop's only suspension point; the caller blocks until
    /// the provider returns.
    fn call(&self, messages: Vec<LLMMessage>) -> Result<String, LLMError>;

    /// Request one completion for the conversation (asynchronous).
    ///
    /// Default implementation delegates to `call`. Override for true async
    /// support.
    async fn acall(&self, messages: Vec<LLMMessage>) -> Result<String, LLMError> {
        self.call(messages)
    }

    /// Check if the model enforces stop sequences.
    fn supports_stop_words(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// BaseLLMState - shared state for model implementations
// ---------------------------------------------------------------------------

/// Shared state for model implementations.
///
/// Provides common fields and helper methods that concrete implementations
/// can embed and delegate to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseLLMState {
    /// The model identifier/name.
    pub model: String,
    /// Optional temperature setting for response generation.
    pub temperature: Option<f64>,
    /// Optional API key.
    pub api_key: Option<String>,
    /// Optional base URL for the API.
    pub base_url: Option<String>,
    /// Stop sequences that the model should use to stop generation.
    pub stop: Vec<String>,
    /// Provider name (e.g., "openai").
    pub provider: String,
}

impl BaseLLMState {
    /// Create a new `BaseLLMState` with the given model name.
    ///
    /// # Panics
    ///
    /// Panics if `model` is empty.
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        assert!(!model.is_empty(), "Model name is required and cannot be empty");

        Self {
            model,
            temperature: None,
            api_key: None,
            base_url: None,
            stop: Vec::new(),
            provider: "openai".to_string(),
        }
    }

    /// Apply stop sequences to truncate response content.
    ///
    /// Finds the earliest occurrence of any stop sequence and truncates the
    /// content at that point. Providers that enforce stop sequences
    /// server-side make this a no-op; it guards against models that echo an
    /// observation anyway.
    pub fn apply_stop_words(&self, content: &str) -> String {
        if self.stop.is_empty() || content.is_empty() {
            return content.to_string();
        }

        let mut earliest_stop_pos = content.len();
        let mut found_stop_word: Option<&str> = None;

        for stop_word in &self.stop {
            if let Some(pos) = content.find(stop_word.as_str()) {
                if pos < earliest_stop_pos {
                    earliest_stop_pos = pos;
                    found_stop_word = Some(stop_word);
                }
            }
        }

        if let Some(word) = found_stop_word {
            log::debug!("applied stop sequence '{}' at position {}", word, earliest_stop_pos);
            content[..earliest_stop_pos].trim().to_string()
        } else {
            content.to_string()
        }
    }

    /// Check if stop sequences are configured for this instance.
    pub fn has_stop_words(&self) -> bool {
        !self.stop.is_empty()
    }

    /// Validate messages have the required `role` and `content` keys.
    pub fn format_messages(&self, messages: Vec<LLMMessage>) -> Result<Vec<LLMMessage>, LLMError> {
        for (i, msg) in messages.iter().enumerate() {
            if !msg.contains_key("role") || !msg.contains_key("content") {
                return Err(LLMError::Other(format!(
                    "Message at index {} must have 'role' and 'content' keys",
                    i
                )));
            }
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_llm_state_new() {
        let state = BaseLLMState::new("gpt-4o-mini");
        assert_eq!(state.model, "gpt-4o-mini");
        assert_eq!(state.provider, "openai");
        assert!(state.stop.is_empty());
    }

    #[test]
    #[should_panic(expected = "Model name is required")]
    fn test_base_llm_state_empty_model() {
        BaseLLMState::new("");
    }

    #[test]
    fn test_apply_stop_words() {
        let mut state = BaseLLMState::new("test-model");
        state.stop = vec!["Observation".to_string()];

        let content = "Thought: counting.\nAction: count\nObservation: I made this up";
        let result = state.apply_stop_words(content);
        assert_eq!(result, "Thought: counting.\nAction: count");
    }

    #[test]
    fn test_apply_stop_words_earliest_wins() {
        let mut state = BaseLLMState::new("test-model");
        state.stop = vec!["Final Answer:".to_string(), "Observation".to_string()];

        let content = "text Observation: a Final Answer: b";
        assert_eq!(state.apply_stop_words(content), "text");
    }

    #[test]
    fn test_apply_stop_words_no_match() {
        let mut state = BaseLLMState::new("test-model");
        state.stop = vec!["STOP".to_string()];
        assert_eq!(state.apply_stop_words("No stop word here"), "No stop word here");
    }

    #[test]
    fn test_message_constructors() {
        let msg = system_message("instructions");
        assert_eq!(msg["role"], "system");
        assert_eq!(msg["content"], "instructions");

        assert_eq!(user_message("hi")["role"], "user");
        assert_eq!(assistant_message("ok")["role"], "assistant");
    }

    #[test]
    fn test_format_messages_invalid() {
        let state = BaseLLMState::new("test");
        let mut msg = HashMap::new();
        msg.insert("role".to_string(), Value::String("user".to_string()));
        // Missing "content"
        assert!(state.format_messages(vec![msg]).is_err());
    }
}
