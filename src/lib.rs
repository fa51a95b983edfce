//! # Reagent
//!
//! A minimal ReAct-style tool-calling agent loop for LLMs.
//!
//! The agent constrains free-form model output into structured tool calls:
//! each turn the model either emits a fenced JSON action block that is parsed
//! and dispatched against a registry of tools, or a `Final Answer:` that ends
//! the run. Tool results are fed back into the conversation as observations,
//! so the model can react to them (including to its own formatting mistakes)
//! on the next turn.

pub mod agents;
pub mod llms;
pub mod tools;
pub mod translations;
pub mod utilities;

// Re-exports for convenience
pub use agents::executor::ToolCallingAgent;
pub use agents::parser::{ParseFailure, FINAL_ANSWER_ACTION};
pub use llms::base_llm::{BaseLLM, BaseLLMState, LLMMessage};
pub use llms::providers::openai::OpenAICompletion;
pub use tools::base_tool::{BaseTool, FunctionTool, ToolArg};
pub use tools::registry::ToolRegistry;
pub use tools::tool_calling::ToolCalling;
pub use utilities::errors::{AgentError, LLMError, RegistryError, ToolError};

/// Library version.
pub const VERSION: &str = "0.1.0";
