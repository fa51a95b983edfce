//! Model-boundary infrastructure.
//!
//! This module provides:
//!
//! - [`base_llm`] - The abstract base trait for model implementations
//! - [`providers`] - Native provider implementations (OpenAI-compatible)

pub mod base_llm;
pub mod providers;

// Re-exports for convenience
pub use base_llm::{BaseLLM, BaseLLMState, LLMMessage};
pub use providers::openai::OpenAICompletion;
