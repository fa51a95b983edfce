//! Error types for the agent loop.
//!
//! The split mirrors the loop's propagation policy: registry and tool errors
//! are recoverable (the dispatcher converts them into observations the model
//! reads on its next turn), while model-boundary errors are fatal and
//! propagate out of the run.

use thiserror::Error;

/// Errors raised by the tool registry at registration time.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with the same (sanitized) name is already registered.
    #[error("a tool named '{name}' is already registered")]
    DuplicateTool { name: String },
}

/// Failure produced by a tool while validating or executing its inputs.
///
/// Tools validate their own arguments; the dispatcher catches these and
/// surfaces them as observations instead of aborting the run.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// An argument was present but had an unusable value.
    #[error("invalid value for argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// A required argument was not provided.
    #[error("missing required argument '{argument}'")]
    MissingArgument { argument: String },

    /// The tool failed while executing.
    #[error("{0}")]
    Execution(String),
}

impl ToolError {
    /// Shorthand for an [`ToolError::InvalidArgument`].
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ToolError::MissingArgument`].
    pub fn missing_argument(argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            argument: argument.into(),
        }
    }
}

/// Errors from the model-call boundary.
///
/// There is no defined recovery path for these; they terminate the run.
#[derive(Debug, Error)]
pub enum LLMError {
    /// No API key was configured for the provider.
    #[error("{provider} API key not set. Set the provider's API key environment variable or pass api_key to the constructor.")]
    MissingApiKey { provider: String },

    /// The provider returned a non-retriable HTTP error.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    /// The provider's response body could not be interpreted.
    #[error("failed to parse {provider} response: {reason}")]
    InvalidResponse { provider: String, reason: String },

    /// All retry attempts were exhausted.
    #[error("{provider} API call failed after {attempts} attempts: {reason}")]
    RetriesExhausted {
        provider: String,
        attempts: u32,
        reason: String,
    },

    /// Transport-level failure from the HTTP client.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Any other boundary failure.
    #[error("{0}")]
    Other(String),
}

/// Top-level error from an agent run.
///
/// Parsing and dispatch failures never appear here — they become
/// conversational observations. Only the model boundary is fatal.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model-call boundary failed.
    #[error(transparent)]
    Llm(#[from] LLMError),
}
