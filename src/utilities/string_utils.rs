//! String utility functions.

use once_cell::sync::Lazy;
use regex::Regex;

static CAMEL_LOWER_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());
static DUPLICATE_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

const MAX_TOOL_NAME_LENGTH: usize = 64;

/// Sanitize a tool name so lookups tolerate model spelling variations.
///
/// Splits camelCase, lowercases, replaces invalid characters with
/// underscores, and truncates to `max_length`. A model that emits
/// `"CountCharOccurrences"` still resolves a tool registered as
/// `"count_char_occurrences"`.
///
/// # Arguments
/// * `name` - Original tool name.
/// * `max_length` - Maximum allowed length (default 64).
pub fn sanitize_tool_name(name: &str, max_length: Option<usize>) -> String {
    let max_len = max_length.unwrap_or(MAX_TOOL_NAME_LENGTH);

    let ascii_name: String = name.chars().filter(|c| c.is_ascii()).collect();

    let split = CAMEL_LOWER_UPPER.replace_all(&ascii_name, "${1}_${2}");
    let lowered = split.to_lowercase();
    let replaced = DISALLOWED_CHARS.replace_all(&lowered, "_");
    let collapsed = DUPLICATE_UNDERSCORE.replace_all(&replaced, "_");
    let stripped = collapsed.trim_matches('_').to_string();

    if stripped.len() > max_len {
        stripped[..max_len].trim_end_matches('_').to_string()
    } else {
        stripped
    }
}
