//! Prompt and message strings for the agent.
//!
//! The default language is English, loaded from the embedded `en.json` file.
//! The data is organized into sections:
//! - `slices`: prompt template fragments (system prompt, observation prefix)
//! - `errors`: observation wording for recoverable failures

/// Raw English translation JSON string, embedded at compile time.
///
/// Used by [`crate::utilities::i18n::I18N`] to load default prompts.
pub const EN_JSON: &str = include_str!("en.json");
