//! Prompt generation for the agent's system message.

use serde::{Deserialize, Serialize};

use crate::utilities::i18n::I18N;

/// Builds the system prompt that seeds every conversation.
///
/// The tool catalog is interpolated verbatim into the prompt template, so
/// catalog line order directly shapes what the model believes is available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prompts {
    /// Internationalization support.
    pub i18n: I18N,
}

impl Prompts {
    /// Create a new `Prompts` with the given translations.
    pub fn new(i18n: I18N) -> Self {
        Self { i18n }
    }

    /// Generate the system prompt embedding the given tool catalog.
    ///
    /// An empty catalog selects the no-tools prompt variant, which still
    /// instructs the model to close with the terminal marker.
    pub fn system(&self, tools_information: &str) -> String {
        if tools_information.is_empty() {
            self.i18n.slice("system_no_tools")
        } else {
            self.i18n
                .slice("system")
                .replace("{tools_information}", tools_information)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_catalog() {
        let prompts = Prompts::default();
        let catalog = "Tool Name: search, Description: Search the web, Arguments: query: string, Outputs: string";
        let system = prompts.system(catalog);
        assert!(system.contains(catalog));
        assert!(!system.contains("{tools_information}"));
        assert!(system.contains("`action`"));
        assert!(system.contains("Final Answer:"));
    }

    #[test]
    fn test_system_prompt_without_tools() {
        let prompts = Prompts::default();
        let system = prompts.system("");
        assert!(system.contains("no tools available"));
        assert!(system.contains("Final Answer:"));
    }
}
