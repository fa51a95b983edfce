//! Internationalization support for prompts and observation wording.
//!
//! Centralizes every string the model sees — the system prompt template,
//! the observation prefix, and the wording of recoverable-failure
//! observations — so they can be swapped out with a custom JSON file.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::translations::EN_JSON;

/// Handles loading and retrieving localized prompts.
///
/// Prompts are stored in a nested map: `kind -> key -> value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18N {
    /// The loaded prompts, keyed by `kind` then by `key`.
    #[serde(skip)]
    prompts: HashMap<String, HashMap<String, String>>,
    /// Optional path to a custom JSON file containing prompts.
    pub prompt_file: Option<String>,
}

impl Default for I18N {
    fn default() -> Self {
        Self::new(None)
    }
}

impl I18N {
    /// Create a new `I18N` instance, loading prompts from the given file
    /// or the embedded default `en.json`.
    pub fn new(prompt_file: Option<String>) -> Self {
        let prompts = match &prompt_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .unwrap_or_else(|_| panic!("Prompt file '{}' not found.", path));
                serde_json::from_str(&content)
                    .unwrap_or_else(|_| panic!("Error decoding JSON from prompts file '{}'.", path))
            }
            None => serde_json::from_str(EN_JSON)
                .expect("Error decoding embedded en.json translations."),
        };

        Self {
            prompts,
            prompt_file,
        }
    }

    /// Retrieve a prompt slice by key.
    pub fn slice(&self, slice: &str) -> String {
        self.retrieve("slices", slice)
    }

    /// Retrieve an error message by key.
    pub fn errors(&self, error: &str) -> String {
        self.retrieve("errors", error)
    }

    /// Retrieve a prompt by `kind` and `key`.
    ///
    /// # Panics
    /// Panics if the prompt for the given kind and key is not found.
    pub fn retrieve(&self, kind: &str, key: &str) -> String {
        self.prompts
            .get(kind)
            .and_then(|section| section.get(key))
            .cloned()
            .unwrap_or_else(|| panic!("Prompt for '{}':'{}' not found.", kind, key))
    }
}

/// Global cached `I18N` instance (default prompts).
static DEFAULT_I18N: OnceLock<I18N> = OnceLock::new();

/// Get the global cached `I18N` instance using the default embedded prompts.
pub fn get_i18n() -> &'static I18N {
    DEFAULT_I18N.get_or_init(|| I18N::new(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slices() {
        let i18n = I18N::default();
        let system = i18n.slice("system");
        assert!(system.contains("{tools_information}"));
        assert!(system.contains("Final Answer:"));
        assert_eq!(i18n.slice("observation_prefix"), "Observation: ");
    }

    #[test]
    fn test_default_errors() {
        let i18n = I18N::default();
        assert_eq!(i18n.errors("no_action_found"), "No JSON found in the action.");
        assert_eq!(i18n.errors("out_of_turns"), "Please submit another request!");
        assert!(i18n.errors("tool_not_found").contains("{tool_name}"));
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn test_missing_key_panics() {
        let i18n = I18N::default();
        i18n.retrieve("slices", "does_not_exist");
    }

    #[test]
    fn test_global_instance() {
        let a = get_i18n();
        let b = get_i18n();
        assert_eq!(a.slice("system"), b.slice("system"));
    }
}
