//! Tool registry — holds and describes the tools available to an agent.
//!
//! Registration order is preserved: the catalog is embedded verbatim into the
//! system prompt, so a stable order keeps the model's view of available
//! actions deterministic across runs.

use std::fmt;

use crate::tools::base_tool::BaseTool;
use crate::utilities::errors::RegistryError;
use crate::utilities::string_utils::sanitize_tool_name;

/// Registry of the tools available to one agent.
///
/// Duplicate names are rejected at registration time; resolution matches on
/// sanitized names so model spelling variations still land on the right tool.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn BaseTool>>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTool`] if a tool with the same
    /// sanitized name is already registered.
    pub fn register(&mut self, tool: Box<dyn BaseTool>) -> Result<(), RegistryError> {
        let sanitized = sanitize_tool_name(tool.name(), None);
        if self
            .tools
            .iter()
            .any(|t| sanitize_tool_name(t.name(), None) == sanitized)
        {
            return Err(RegistryError::DuplicateTool {
                name: tool.name().to_string(),
            });
        }

        log::debug!("registered tool '{}'", tool.name());
        self.tools.push(tool);
        Ok(())
    }

    /// Resolve a tool by name (sanitized exact match).
    pub fn resolve(&self, name: &str) -> Option<&dyn BaseTool> {
        let sanitized = sanitize_tool_name(name, None);
        self.tools
            .iter()
            .find(|t| sanitize_tool_name(t.name(), None) == sanitized)
            .map(|t| t.as_ref())
    }

    /// Produce the tool catalog: one descriptive line per tool, in
    /// registration order.
    pub fn describe_all(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.catalog_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Comma-joined tool names, in registration order.
    pub fn names(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Get the total number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use super::*;
    use crate::tools::base_tool::FunctionTool;

    fn make_tool(name: &str) -> Box<dyn BaseTool> {
        Box::new(
            FunctionTool::new(name, format!("The {} tool.", name), Arc::new(|_| Ok(Value::Null)))
                .with_arg("query", "string")
                .with_output("string"),
        )
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("search")).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("search").is_some());
        assert!(registry.resolve("lookup_weather").is_none());
    }

    #[test]
    fn test_resolve_sanitized_spelling() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("count_char_occurrences")).unwrap();

        assert!(registry.resolve("CountCharOccurrences").is_some());
        assert!(registry.resolve("count_char_occurrences ").is_some());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("search")).unwrap();

        let result = registry.register(make_tool("search"));
        assert!(matches!(result, Err(RegistryError::DuplicateTool { .. })));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected_after_sanitization() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("web_search")).unwrap();

        let result = registry.register(make_tool("WebSearch"));
        assert!(result.is_err());
    }

    #[test]
    fn test_describe_all_stable_order() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("alpha")).unwrap();
        registry.register(make_tool("beta")).unwrap();
        registry.register(make_tool("gamma")).unwrap();

        let catalog = registry.describe_all();
        let lines: Vec<&str> = catalog.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Tool Name: alpha,"));
        assert!(lines[1].starts_with("Tool Name: beta,"));
        assert!(lines[2].starts_with("Tool Name: gamma,"));

        assert_eq!(registry.names(), "alpha, beta, gamma");
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.describe_all(), "");
    }
}
