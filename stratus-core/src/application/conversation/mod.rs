//! # Conversation Module
//!
//! The append-only turn log owned by one orchestration run, and the text of
//! the system turn it is seeded with.
//!
//! The log enforces the tool-call pairing rules on every append:
//!
//! - a tool result must answer a call from the latest assistant turn that has
//!   not been answered yet
//! - no other turn may be appended while such calls are outstanding
//!
//! A rejected append leaves the log exactly as it was.

mod instructions;

pub use instructions::{DEFAULT_SYSTEM_TEMPLATE, SUBJECTS_PLACEHOLDER, compose_system_turn};

use crate::types::{AssistantMessage, ToolCallRequest, ToolResult, Turn};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("tool result '{call_id}' does not answer any pending tool call")]
    OrphanToolResult { call_id: String },
    #[error("{turn} turn appended while {pending} tool call(s) are unanswered")]
    UnansweredToolCalls { turn: &'static str, pending: usize },
    #[error("assistant turn repeats tool call id '{call_id}'")]
    DuplicateCallId { call_id: String },
}

impl ConversationError {
    pub fn user_message(&self) -> String {
        "The conversation got out of order. Please ask again.".to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    /// Start a log with one system turn followed by one user turn.
    pub fn seeded(system: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::System(system.into()), Turn::User(query.into())],
        }
    }

    pub fn append(&mut self, turn: Turn) -> Result<(), ConversationError> {
        let pending = self.pending_calls();
        match &turn {
            Turn::ToolResult(ToolResult { call_id, .. }) => {
                if !pending.iter().any(|call| &call.call_id == call_id) {
                    return Err(ConversationError::OrphanToolResult {
                        call_id: call_id.clone(),
                    });
                }
            }
            other if !pending.is_empty() => {
                return Err(ConversationError::UnansweredToolCalls {
                    turn: other.role(),
                    pending: pending.len(),
                });
            }
            Turn::Assistant(message) => check_unique_ids(message)?,
            _ => {}
        }
        self.turns.push(turn);
        Ok(())
    }

    /// Read-only view handed to the reasoning engine.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    /// Calls of the latest assistant turn that have no result yet, in request order.
    pub fn pending_calls(&self) -> Vec<&ToolCallRequest> {
        let Some(position) = self
            .turns
            .iter()
            .rposition(|turn| matches!(turn, Turn::Assistant(_)))
        else {
            return Vec::new();
        };
        let Turn::Assistant(message) = &self.turns[position] else {
            return Vec::new();
        };

        let answered: HashSet<&str> = self.turns[position + 1..]
            .iter()
            .filter_map(|turn| match turn {
                Turn::ToolResult(result) => Some(result.call_id.as_str()),
                _ => None,
            })
            .collect();
        message
            .tool_calls
            .iter()
            .filter(|call| !answered.contains(call.call_id.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

fn check_unique_ids(message: &AssistantMessage) -> Result<(), ConversationError> {
    let mut seen = HashSet::new();
    for call in &message.tool_calls {
        if !seen.insert(call.call_id.as_str()) {
            return Err(ConversationError::DuplicateCallId {
                call_id: call.call_id.clone(),
            });
        }
    }
    Ok(())
}
