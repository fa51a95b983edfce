//! The agent turn loop.
//!
//! Drives the conversation: build the system prompt from the tool catalog,
//! request one completion per turn, detect the terminal marker, dispatch
//! parsed actions, and feed observations back — up to a turn budget.

use uuid::Uuid;

use crate::agents::parser;
use crate::llms::base_llm::{assistant_message, system_message, user_message, BaseLLM, LLMMessage};
use crate::tools::registry::ToolRegistry;
use crate::tools::tool_usage::ToolUsage;
use crate::utilities::errors::AgentError;
use crate::utilities::i18n::I18N;
use crate::utilities::logger::Logger;
use crate::utilities::printer::{Printer, PrinterColor};
use crate::utilities::prompts::Prompts;

/// Default turn budget when the caller does not supply one.
pub const DEFAULT_MAX_TURNS: u32 = 5;

/// Stop sequence handed to the model so it never hallucinates an
/// observation of its own.
pub const OBSERVATION_STOP: &str = "Observation";

/// A ReAct-style tool-calling agent.
///
/// Each turn makes exactly one blocking model call and at most one tool
/// dispatch. Parsing and dispatch failures become observations the model
/// can self-correct from; only the model boundary itself is fatal.
pub struct ToolCallingAgent {
    llm: Box<dyn BaseLLM>,
    registry: ToolRegistry,
    i18n: I18N,
    prompts: Prompts,
    logger: Logger,
    printer: Printer,
    verbose: bool,
    /// Conversation transcript for the current run. Append-only while the
    /// run is in flight; reset at the start of the next run.
    messages: Vec<LLMMessage>,
}

impl std::fmt::Debug for ToolCallingAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCallingAgent")
            .field("model", &self.llm.model())
            .field("tools", &self.registry.names())
            .field("verbose", &self.verbose)
            .field("messages_count", &self.messages.len())
            .finish()
    }
}

impl ToolCallingAgent {
    /// Create a new agent over the given model and tool registry.
    ///
    /// If the model has no stop sequences configured, the observation stop
    /// sequence is installed so generation halts before the model writes
    /// an observation itself.
    pub fn new(mut llm: Box<dyn BaseLLM>, registry: ToolRegistry) -> Self {
        if llm.stop().is_empty() {
            llm.set_stop(vec![OBSERVATION_STOP.to_string()]);
        }

        let i18n = I18N::default();
        Self {
            llm,
            registry,
            prompts: Prompts::new(i18n.clone()),
            i18n,
            logger: Logger::new(false),
            printer: Printer::default(),
            verbose: false,
            messages: Vec::new(),
        }
    }

    /// Builder method to enable verbose step tracing.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self.logger.verbose = verbose;
        self
    }

    /// Builder method to use custom translations.
    pub fn with_i18n(mut self, i18n: I18N) -> Self {
        self.prompts = Prompts::new(i18n.clone());
        self.i18n = i18n;
        self
    }

    /// The model this agent drives.
    pub fn llm(&self) -> &dyn BaseLLM {
        self.llm.as_ref()
    }

    /// The conversation transcript of the most recent run.
    pub fn messages(&self) -> &[LLMMessage] {
        &self.messages
    }

    /// Run the agent to answer a user query, allowing multiple
    /// tool-calling turns.
    ///
    /// Returns the text following the terminal marker, or the fixed
    /// exhaustion message once the turn budget reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Llm`] if the model-call boundary fails; there
    /// is no recovery path for that boundary.
    pub fn run(&mut self, query: &str, max_turns: u32) -> Result<String, AgentError> {
        self.setup_messages(query);

        let run_id = Uuid::new_v4();
        let mut remaining = max_turns;

        while remaining > 0 {
            log::debug!(
                "model call: run_id={}, messages={}, remaining_turns={}",
                run_id,
                self.messages.len(),
                remaining
            );

            let agent_step = self.llm.call(self.messages.clone())?;

            if self.verbose {
                self.printer
                    .print(&format!("Agent:\n{}", agent_step), PrinterColor::Purple);
            }

            // Terminal check is scoped to the newly generated text, before
            // any observation is appended, so an observation echoing the
            // marker on a prior turn cannot end the run.
            if let Some(final_answer) = parser::extract_final_answer(&agent_step) {
                self.logger.log(
                    "info",
                    &format!("final answer after {} turn(s)", max_turns - remaining + 1),
                    Some(PrinterColor::BoldGreen),
                );
                return Ok(final_answer);
            }

            let observation = match parser::parse_action(&agent_step) {
                Ok(calling) => ToolUsage::new(&self.registry, self.i18n.clone())
                    .with_verbose(self.verbose)
                    .use_tool(&calling),
                Err(failure) => {
                    log::debug!("run_id={}: {}", run_id, failure);
                    self.i18n.errors(failure.error_key())
                }
            };

            let observation_prefix = self.i18n.slice("observation_prefix");
            if self.verbose {
                self.printer.print(
                    &format!("{}{}", observation_prefix, observation),
                    PrinterColor::Yellow,
                );
            }

            self.messages.push(assistant_message(&format!(
                "{}\n{}{}",
                agent_step, observation_prefix, observation
            )));

            remaining -= 1;
        }

        self.logger
            .log("info", "turn budget exhausted", Some(PrinterColor::BoldYellow));
        Ok(self.i18n.errors("out_of_turns"))
    }

    /// Seed the conversation with the system prompt and user query.
    fn setup_messages(&mut self, query: &str) {
        self.messages.clear();
        let system = self.prompts.system(&self.registry.describe_all());
        self.messages.push(system_message(&system));
        self.messages.push(user_message(query));
    }
}
