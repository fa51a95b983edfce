//! Parsing of raw model output into structured tool calls.
//!
//! The model is instructed to emit exactly one fenced code block containing a
//! JSON object with `action` and `action_input` keys. This module extracts
//! that block, and detects the terminal marker that ends a run. Parsing never
//! raises an unrecoverable error: every failure mode is a value the loop can
//! turn into an observation.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::tools::tool_calling::ToolCalling;

/// The literal phrase that signals a final answer.
pub const FINAL_ANSWER_ACTION: &str = "Final Answer:";

/// Matches the first fenced code block holding a JSON object. An optional
/// `json` language tag on the fence is accepted.
static ACTION_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap());

// ---------------------------------------------------------------------------
// ParseFailure
// ---------------------------------------------------------------------------

/// Ways a turn's text can fail to yield an action.
///
/// Each variant is recoverable: the loop surfaces it to the model as an
/// observation so the model can retry with corrected formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// No fenced JSON block was present in the text.
    NoActionFound,
    /// A fenced block was present but its content was not valid JSON, or
    /// `action_input` was not a JSON object.
    MalformedAction,
    /// Valid JSON, but the `action` key was missing or not a string.
    MissingActionName,
}

impl ParseFailure {
    /// The i18n error key holding this failure's observation wording.
    pub fn error_key(&self) -> &'static str {
        match self {
            Self::NoActionFound => "no_action_found",
            Self::MalformedAction => "malformed_action",
            Self::MissingActionName => "missing_action_name",
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoActionFound => "no action block found",
            Self::MalformedAction => "action block is not valid JSON",
            Self::MissingActionName => "action block has no action name",
        };
        write!(f, "{}", text)
    }
}

// ---------------------------------------------------------------------------
// Parse functions
// ---------------------------------------------------------------------------

/// Extract one structured action from a block of free-form model text.
///
/// Only the first fenced block is considered; the model is instructed to
/// emit a single action per turn.
pub fn parse_action(text: &str) -> Result<ToolCalling, ParseFailure> {
    let caps = ACTION_BLOCK_RE
        .captures(text)
        .ok_or(ParseFailure::NoActionFound)?;
    let block = caps.get(1).map_or("", |m| m.as_str());

    let value: Value =
        serde_json::from_str(block).map_err(|_| ParseFailure::MalformedAction)?;
    let object = value.as_object().ok_or(ParseFailure::MalformedAction)?;

    let tool_name = object
        .get("action")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(ParseFailure::MissingActionName)?;

    let arguments: HashMap<String, Value> = match object.get("action_input") {
        None | Some(Value::Null) => HashMap::new(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Some(_) => return Err(ParseFailure::MalformedAction),
    };

    Ok(ToolCalling::new(tool_name, arguments))
}

/// Check the newly generated text for the terminal marker.
///
/// Returns the trimmed text following the first occurrence of
/// `Final Answer:`. The check runs only on the current completion, before
/// any observation is appended, so an observation echoing the phrase on a
/// prior turn cannot false-trigger it.
pub fn extract_final_answer(text: &str) -> Option<String> {
    text.find(FINAL_ANSWER_ACTION)
        .map(|idx| text[idx + FINAL_ANSWER_ACTION.len()..].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_fence() {
        let text = "Thought: I should count.\nAction:\n```\n{\"action\": \"count_char_occurrences\", \"action_input\": {\"character\": \"r\", \"input_string\": \"strawberry\"}}\n```";
        let calling = parse_action(text).unwrap();
        assert_eq!(calling.tool_name, "count_char_occurrences");
        assert_eq!(calling.arguments["character"], "r");
        assert_eq!(calling.arguments["input_string"], "strawberry");
    }

    #[test]
    fn test_parse_json_tagged_fence() {
        let text = "Action:\n```json\n{\"action\": \"search\", \"action_input\": {\"query\": \"weather\"}}\n```";
        let calling = parse_action(text).unwrap();
        assert_eq!(calling.tool_name, "search");
    }

    #[test]
    fn test_parse_no_fence() {
        let text = "Thought: I will just answer directly without any action.";
        assert_eq!(parse_action(text), Err(ParseFailure::NoActionFound));
    }

    #[test]
    fn test_parse_invalid_json() {
        let text = "```\n{\"action\": \"search\", \"action_input\": }\n```";
        assert_eq!(parse_action(text), Err(ParseFailure::MalformedAction));
    }

    #[test]
    fn test_parse_missing_action_key() {
        let text = "```\n{\"action_input\": {\"query\": \"weather\"}}\n```";
        assert_eq!(parse_action(text), Err(ParseFailure::MissingActionName));
    }

    #[test]
    fn test_parse_non_object_action_input() {
        let text = "```\n{\"action\": \"search\", \"action_input\": \"weather\"}\n```";
        assert_eq!(parse_action(text), Err(ParseFailure::MalformedAction));
    }

    #[test]
    fn test_parse_absent_action_input_is_zero_args() {
        let text = "```\n{\"action\": \"ping\"}\n```";
        let calling = parse_action(text).unwrap();
        assert_eq!(calling.tool_name, "ping");
        assert!(calling.arguments.is_empty());
    }

    #[test]
    fn test_parse_first_block_wins() {
        let text = "```\n{\"action\": \"first\"}\n```\nand then\n```\n{\"action\": \"second\"}\n```";
        let calling = parse_action(text).unwrap();
        assert_eq!(calling.tool_name, "first");
    }

    #[test]
    fn test_extract_final_answer() {
        let text = "Thought: I now know the final answer\nFinal Answer: 3";
        assert_eq!(extract_final_answer(text), Some("3".to_string()));
    }

    #[test]
    fn test_extract_final_answer_trims() {
        let text = "Final Answer:   The temperature is 72 degrees.  \n";
        assert_eq!(
            extract_final_answer(text),
            Some("The temperature is 72 degrees.".to_string())
        );
    }

    #[test]
    fn test_extract_final_answer_absent() {
        assert_eq!(extract_final_answer("Thought: still working on it"), None);
    }

    #[test]
    fn test_extract_final_answer_first_marker() {
        let text = "Final Answer: 3\nFinal Answer: 4";
        assert_eq!(extract_final_answer(text), Some("3\nFinal Answer: 4".to_string()));
    }

    #[test]
    fn test_failure_error_keys() {
        assert_eq!(ParseFailure::NoActionFound.error_key(), "no_action_found");
        assert_eq!(ParseFailure::MalformedAction.error_key(), "malformed_action");
        assert_eq!(
            ParseFailure::MissingActionName.error_key(),
            "missing_action_name"
        );
    }
}
