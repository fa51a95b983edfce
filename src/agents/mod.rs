//! Agent infrastructure.
//!
//! This module provides the turn loop that drives a conversation and the
//! parser that extracts structured actions from raw model output.

pub mod executor;
pub mod parser;

// Re-exports for convenience
pub use executor::{ToolCallingAgent, DEFAULT_MAX_TURNS, OBSERVATION_STOP};
pub use parser::{extract_final_answer, parse_action, ParseFailure, FINAL_ANSWER_ACTION};
