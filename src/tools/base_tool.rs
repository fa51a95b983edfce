//! Core tool abstractions.
//!
//! A tool is a named, invocable unit with a static descriptor: its argument
//! names and type labels are supplied at registration time rather than
//! inferred, so the catalog shown to the model is fully explicit. Declared
//! types are documentation for the model's benefit only — each tool validates
//! its own inputs and fails with a [`ToolError`] instead of crashing the run.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utilities::errors::ToolError;

/// Placeholder label used when an argument or output type is not declared,
/// so catalog entries stay well-formed.
pub const UNSPECIFIED_TYPE: &str = "unspecified";

// ---------------------------------------------------------------------------
// ToolArg
// ---------------------------------------------------------------------------

/// A declared tool argument: name plus a human-readable type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolArg {
    /// Argument name, as the model must spell it in `action_input`.
    pub name: String,
    /// Type label shown in the catalog (e.g., "string", "int").
    pub type_label: String,
}

impl ToolArg {
    /// Create a new argument descriptor.
    pub fn new(name: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
        }
    }

    /// Create an argument descriptor with no declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, UNSPECIFIED_TYPE)
    }
}

// ---------------------------------------------------------------------------
// BaseTool trait
// ---------------------------------------------------------------------------

/// Type alias for a boxed tool function.
pub type ToolFn =
    Arc<dyn Fn(HashMap<String, Value>) -> Result<Value, ToolError> + Send + Sync>;

/// Abstract base trait for all tools available to the agent.
///
/// The loop and dispatcher depend only on this contract; concrete tools
/// (character counting, web search, etc.) are collaborators satisfying it.
#[async_trait]
pub trait BaseTool: Send + Sync + fmt::Debug {
    /// The unique name of the tool.
    fn name(&self) -> &str;

    /// Description used to tell the model how/when/why to use the tool.
    fn description(&self) -> &str;

    /// Ordered argument descriptors, as shown to the model.
    fn arguments(&self) -> &[ToolArg];

    /// Label describing the tool's return value.
    fn output_label(&self) -> &str {
        UNSPECIFIED_TYPE
    }

    /// Execute the tool with the raw argument mapping.
    ///
    /// Implementations must validate their own inputs and return a
    /// [`ToolError`] for bad values rather than panic.
    fn invoke(&self, args: HashMap<String, Value>) -> Result<Value, ToolError>;

    /// Asynchronous execution of the tool.
    ///
    /// Default implementation calls `invoke` synchronously. Override for
    /// true async support.
    async fn ainvoke(&self, args: HashMap<String, Value>) -> Result<Value, ToolError> {
        self.invoke(args)
    }

    /// One descriptive catalog line for the system prompt.
    fn catalog_line(&self) -> String {
        let args = self
            .arguments()
            .iter()
            .map(|arg| format!("{}: {}", arg.name, arg.type_label))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Tool Name: {}, Description: {}, Arguments: {}, Outputs: {}",
            self.name(),
            self.description().trim(),
            args,
            self.output_label()
        )
    }
}

// ---------------------------------------------------------------------------
// FunctionTool (wraps a callable function)
// ---------------------------------------------------------------------------

/// Concrete tool that wraps a callable function with a static descriptor.
#[derive(Clone)]
pub struct FunctionTool {
    tool_name: String,
    tool_description: String,
    tool_arguments: Vec<ToolArg>,
    tool_output: String,
    /// The wrapped function.
    pub func: ToolFn,
}

impl fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.tool_name)
            .field("description", &self.tool_description)
            .field("arguments", &self.tool_arguments)
            .field("output", &self.tool_output)
            .finish()
    }
}

impl FunctionTool {
    /// Create a new `FunctionTool` wrapping the given function.
    ///
    /// A tool with zero declared arguments is valid.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        func: ToolFn,
    ) -> Self {
        Self {
            tool_name: name.into(),
            tool_description: description.into(),
            tool_arguments: Vec::new(),
            tool_output: UNSPECIFIED_TYPE.to_string(),
            func,
        }
    }

    /// Builder method to append an argument descriptor.
    pub fn with_arg(mut self, name: impl Into<String>, type_label: impl Into<String>) -> Self {
        self.tool_arguments.push(ToolArg::new(name, type_label));
        self
    }

    /// Builder method to set the output type label.
    pub fn with_output(mut self, label: impl Into<String>) -> Self {
        self.tool_output = label.into();
        self
    }
}

#[async_trait]
impl BaseTool for FunctionTool {
    fn name(&self) -> &str {
        &self.tool_name
    }

    fn description(&self) -> &str {
        &self.tool_description
    }

    fn arguments(&self) -> &[ToolArg] {
        &self.tool_arguments
    }

    fn output_label(&self) -> &str {
        &self.tool_output
    }

    fn invoke(&self, args: HashMap<String, Value>) -> Result<Value, ToolError> {
        (self.func)(args)
    }
}

// ---------------------------------------------------------------------------
// Argument helpers for tool implementations
// ---------------------------------------------------------------------------

/// Extract a required string argument from the raw mapping.
///
/// Returns [`ToolError::MissingArgument`] when absent and
/// [`ToolError::InvalidArgument`] when present with a non-string value.
pub fn required_str(args: &HashMap<String, Value>, name: &str) -> Result<String, ToolError> {
    match args.get(name) {
        None => Err(ToolError::missing_argument(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ToolError::invalid_argument(
            name,
            format!("expected a string, got {}", other),
        )),
    }
}
