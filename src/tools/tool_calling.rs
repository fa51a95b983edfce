//! Tool calling data structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A structured action request parsed from one turn's model text.
///
/// Captures the model's intent to invoke a specific tool with the given
/// arguments. Arguments carry whatever values the JSON held — they are not
/// type-checked against the tool's declared labels before dispatch.
/// Constructed fresh each turn and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCalling {
    /// The name of the tool to be called.
    pub tool_name: String,
    /// The raw argument mapping. Empty if `action_input` was absent.
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

impl ToolCalling {
    /// Create a new `ToolCalling` instance.
    pub fn new(tool_name: impl Into<String>, arguments: HashMap<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_arguments() {
        let calling: ToolCalling =
            serde_json::from_str(r#"{"tool_name": "ping"}"#).unwrap();
        assert_eq!(calling.tool_name, "ping");
        assert!(calling.arguments.is_empty());
    }
}
