//! Text inspection tools.

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::tools::base_tool::{required_str, BaseTool, ToolArg};
use crate::utilities::errors::ToolError;

static COUNT_CHAR_ARGS: Lazy<Vec<ToolArg>> = Lazy::new(|| {
    vec![
        ToolArg::new("character", "string"),
        ToolArg::new("input_string", "string"),
    ]
});

/// Counts how many times a character appears in a string.
///
/// Matching is case-insensitive. The `character` argument must be exactly
/// one character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountCharOccurrences;

#[async_trait]
impl BaseTool for CountCharOccurrences {
    fn name(&self) -> &str {
        "count_char_occurrences"
    }

    fn description(&self) -> &str {
        "Count the number of times a character appears in a string."
    }

    fn arguments(&self) -> &[ToolArg] {
        &COUNT_CHAR_ARGS
    }

    fn output_label(&self) -> &str {
        "int"
    }

    fn invoke(&self, args: HashMap<String, Value>) -> Result<Value, ToolError> {
        let character = required_str(&args, "character")?;
        let input_string = required_str(&args, "input_string")?;

        if character.chars().count() != 1 {
            return Err(ToolError::invalid_argument(
                "character",
                "must be a single character",
            ));
        }

        let needle = character.to_lowercase();
        let count = input_string.to_lowercase().matches(&needle).count();

        Ok(Value::from(count as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(character: &str, input_string: &str) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        map.insert("character".to_string(), Value::from(character));
        map.insert("input_string".to_string(), Value::from(input_string));
        map
    }

    #[test]
    fn test_count_strawberry() {
        let tool = CountCharOccurrences;
        assert_eq!(tool.invoke(args("r", "strawberry")).unwrap(), Value::from(3));
    }

    #[test]
    fn test_count_is_case_insensitive() {
        let tool = CountCharOccurrences;
        assert_eq!(tool.invoke(args("R", "strawberry")).unwrap(), Value::from(3));
        assert_eq!(tool.invoke(args("a", "Alabama")).unwrap(), Value::from(4));
    }

    #[test]
    fn test_count_zero_occurrences() {
        let tool = CountCharOccurrences;
        assert_eq!(tool.invoke(args("z", "strawberry")).unwrap(), Value::from(0));
    }

    #[test]
    fn test_multi_char_rejected() {
        let tool = CountCharOccurrences;
        let result = tool.invoke(args("rr", "strawberry"));
        assert!(matches!(result, Err(ToolError::InvalidArgument { .. })));
    }

    #[test]
    fn test_missing_argument() {
        let tool = CountCharOccurrences;
        let mut map = HashMap::new();
        map.insert("character".to_string(), Value::from("r"));
        assert!(matches!(
            tool.invoke(map),
            Err(ToolError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_catalog_line() {
        let tool = CountCharOccurrences;
        assert_eq!(
            tool.catalog_line(),
            "Tool Name: count_char_occurrences, Description: Count the number of times a character appears in a string., Arguments: character: string, input_string: string, Outputs: int"
        );
    }
}
