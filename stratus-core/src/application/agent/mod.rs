//! # Agent Module
//!
//! The bounded engine/tool loop that answers one question.
//!
//! ## Key Types
//!
//! - [`Orchestrator`] - drives one seeded [`ConversationLog`](crate::conversation::ConversationLog) to a result
//! - [`OrchestrationOutcome`] - the result plus the rounds and tool steps taken
//! - [`AgentError`] - failures of the loop machinery itself
//!
//! ## Loop
//!
//! 1. Ask the engine for the next assistant turn
//! 2. No tool calls: that text is the answer
//! 3. Otherwise run every requested tool in order, append the results, repeat
//!
//! The engine is invoked at most [`MAX_ROUNDS`](crate::constants::MAX_ROUNDS)
//! times. Tool failures become result text and never end the loop.

mod errors;
mod models;
mod runner;

#[cfg(test)]
mod tests;

pub use errors::AgentError;
pub use models::{AgentStep, OrchestrationOutcome};
pub use runner::Orchestrator;
