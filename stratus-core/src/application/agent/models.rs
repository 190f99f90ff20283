use crate::conversation::ConversationLog;
use crate::types::{OrchestrationResult, ToolArguments};

/// One tool dispatch made during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStep {
    pub round: usize,
    pub call_id: String,
    pub tool: String,
    pub arguments: ToolArguments,
    pub success: bool,
    /// Text appended to the log: tool output or the rendered error
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct OrchestrationOutcome {
    pub conversation_id: String,
    pub result: OrchestrationResult,
    /// Number of engine invocations
    pub rounds: usize,
    pub steps: Vec<AgentStep>,
    pub log: ConversationLog,
}

impl OrchestrationOutcome {
    pub fn answer(&self) -> Option<&str> {
        match &self.result {
            OrchestrationResult::FinalAnswer(text) => Some(text),
            OrchestrationResult::RoundLimitExceeded => None,
        }
    }
}
