//! Tool dispatch — turns a parsed action into an observation string.
//!
//! Every failure on this path is recoverable: an unknown tool name or a
//! tool-internal error becomes conversational content the model can react to
//! on its next turn, never a propagated error that would abort the run.

use serde_json::Value;

use crate::tools::registry::ToolRegistry;
use crate::tools::tool_calling::ToolCalling;
use crate::utilities::i18n::I18N;
use crate::utilities::printer::{Printer, PrinterColor};

/// Dispatches one tool-use attempt by the agent.
///
/// Resolves the requested tool against the registry, invokes it with the raw
/// argument mapping, and stringifies the outcome into an observation.
pub struct ToolUsage<'a> {
    /// The registry to resolve tools against.
    pub registry: &'a ToolRegistry,
    /// Internationalization helper for observation wording.
    pub i18n: I18N,
    /// Output printer for verbose mode.
    pub printer: Printer,
    /// Whether to echo dispatch failures to the console.
    pub verbose: bool,
}

impl<'a> ToolUsage<'a> {
    /// Create a new `ToolUsage` against the given registry.
    pub fn new(registry: &'a ToolRegistry, i18n: I18N) -> Self {
        Self {
            registry,
            i18n,
            printer: Printer::default(),
            verbose: false,
        }
    }

    /// Builder method to enable verbose output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Execute a tool call and return the observation string.
    ///
    /// Declared argument types are documentation only; the raw mapping is
    /// passed through unchanged and the tool validates its own inputs.
    pub fn use_tool(&self, calling: &ToolCalling) -> String {
        let Some(tool) = self.registry.resolve(&calling.tool_name) else {
            let message = self
                .i18n
                .errors("tool_not_found")
                .replace("{tool_name}", &calling.tool_name);
            log::warn!("dispatch failed: {}", message);
            if self.verbose {
                self.printer.print(&message, PrinterColor::Red);
            }
            return message;
        };

        match tool.invoke(calling.arguments.clone()) {
            Ok(result) => stringify_result(&result),
            Err(e) => {
                let message = self
                    .i18n
                    .errors("tool_execution")
                    .replace("{error}", &e.to_string());
                log::warn!("tool '{}' failed: {}", calling.tool_name, e);
                if self.verbose {
                    self.printer.print(&message, PrinterColor::Red);
                }
                message
            }
        }
    }
}

/// Stringify a tool's return value for the text-only conversation.
///
/// JSON strings are rendered without surrounding quotes; everything else
/// uses its compact JSON rendering.
pub fn stringify_result(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::tools::base_tool::{required_str, FunctionTool};
    use crate::utilities::errors::ToolError;

    fn registry_with_counter() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(Box::new(
                FunctionTool::new(
                    "string_length",
                    "Measure the length of a string.",
                    Arc::new(|args| {
                        let text = required_str(&args, "text")?;
                        Ok(Value::from(text.chars().count() as u64))
                    }),
                )
                .with_arg("text", "string")
                .with_output("int"),
            ))
            .unwrap();
        registry
    }

    fn calling(name: &str, args: &[(&str, Value)]) -> ToolCalling {
        let arguments: HashMap<String, Value> = args
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        ToolCalling::new(name, arguments)
    }

    #[test]
    fn test_use_tool_stringifies_number() {
        let registry = registry_with_counter();
        let usage = ToolUsage::new(&registry, I18N::default());

        let observation = usage.use_tool(&calling(
            "string_length",
            &[("text", Value::from("hello"))],
        ));
        assert_eq!(observation, "5");
    }

    #[test]
    fn test_use_tool_unknown_name() {
        let registry = registry_with_counter();
        let usage = ToolUsage::new(&registry, I18N::default());

        let observation = usage.use_tool(&calling("lookup_weather", &[]));
        assert_eq!(
            observation,
            "Tool 'lookup_weather' not found in available tools."
        );
    }

    #[test]
    fn test_use_tool_internal_failure_becomes_observation() {
        let registry = registry_with_counter();
        let usage = ToolUsage::new(&registry, I18N::default());

        let observation = usage.use_tool(&calling("string_length", &[]));
        assert!(observation.starts_with("Tool execution error:"));
        assert!(observation.contains("missing required argument 'text'"));
    }

    #[test]
    fn test_use_tool_execution_variant() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Box::new(FunctionTool::new(
                "broken",
                "Always fails.",
                Arc::new(|_| Err(ToolError::Execution("upstream timed out".to_string()))),
            )))
            .unwrap();
        let usage = ToolUsage::new(&registry, I18N::default());

        let observation = usage.use_tool(&calling("broken", &[]));
        assert_eq!(observation, "Tool execution error: upstream timed out");
    }

    #[test]
    fn test_stringify_result_variants() {
        assert_eq!(stringify_result(&Value::String("plain".to_string())), "plain");
        assert_eq!(stringify_result(&Value::from(3)), "3");
        assert_eq!(stringify_result(&Value::Bool(true)), "true");
        assert_eq!(
            stringify_result(&serde_json::json!({"count": 3})),
            r#"{"count":3}"#
        );
    }
}
