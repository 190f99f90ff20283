use super::errors::AgentError;
use super::models::{AgentStep, OrchestrationOutcome};
use crate::application::invoker::ToolInvoker;
use crate::constants::MAX_ROUNDS;
use crate::conversation::ConversationLog;
use crate::model::ReasoningEngine;
use crate::types::{OrchestrationResult, ToolCallRequest, ToolCatalog, Turn};
use tracing::{debug, info, warn};
use uuid::Uuid;

enum LoopState {
    AwaitingEngine,
    DispatchingTools,
    Done(OrchestrationResult),
}

/// Runs one conversation against an engine, a catalog, and an invoker.
pub struct Orchestrator<'a, E: ReasoningEngine + ?Sized> {
    engine: &'a E,
    catalog: &'a ToolCatalog,
    invoker: &'a ToolInvoker,
}

impl<'a, E: ReasoningEngine + ?Sized> Orchestrator<'a, E> {
    pub fn new(engine: &'a E, catalog: &'a ToolCatalog, invoker: &'a ToolInvoker) -> Self {
        Self {
            engine,
            catalog,
            invoker,
        }
    }

    /// Drive a freshly seeded log until the engine answers or the round cap is hit.
    pub async fn run(&self, mut log: ConversationLog) -> Result<OrchestrationOutcome, AgentError> {
        let conversation_id = Uuid::new_v4().to_string();
        info!(
            conversation_id = conversation_id.as_str(),
            provider = self.engine.id(),
            model = self.engine.model(),
            tools = self.catalog.len(),
            "Orchestration started"
        );

        let mut rounds = 0usize;
        let mut steps = Vec::new();
        let mut state = LoopState::AwaitingEngine;

        loop {
            state = match state {
                LoopState::AwaitingEngine => {
                    rounds += 1;
                    debug!(
                        conversation_id = conversation_id.as_str(),
                        round = rounds,
                        turns = log.len(),
                        "Invoking reasoning engine"
                    );
                    let reply = self.engine.complete(log.snapshot(), self.catalog).await?;
                    let answer = reply.is_final().then(|| reply.text.clone());
                    let requested = reply.tool_calls.len();
                    log.append(Turn::Assistant(reply))?;

                    match answer {
                        Some(text) => LoopState::Done(OrchestrationResult::FinalAnswer(text)),
                        None => {
                            debug!(
                                conversation_id = conversation_id.as_str(),
                                round = rounds,
                                requested,
                                "Engine requested tools"
                            );
                            LoopState::DispatchingTools
                        }
                    }
                }
                LoopState::DispatchingTools => {
                    let calls: Vec<ToolCallRequest> =
                        log.pending_calls().into_iter().cloned().collect();
                    for call in calls {
                        let step = self.dispatch(rounds, call).await;
                        log.append(Turn::tool_result(step.call_id.clone(), step.output.clone()))?;
                        steps.push(step);
                    }

                    if rounds >= MAX_ROUNDS {
                        warn!(
                            conversation_id = conversation_id.as_str(),
                            rounds, "Round limit reached without a final answer"
                        );
                        LoopState::Done(OrchestrationResult::RoundLimitExceeded)
                    } else {
                        LoopState::AwaitingEngine
                    }
                }
                LoopState::Done(result) => {
                    info!(
                        conversation_id = conversation_id.as_str(),
                        rounds,
                        tool_calls = steps.len(),
                        answered = matches!(result, OrchestrationResult::FinalAnswer(_)),
                        "Orchestration finished"
                    );
                    return Ok(OrchestrationOutcome {
                        conversation_id,
                        result,
                        rounds,
                        steps,
                        log,
                    });
                }
            };
        }
    }

    async fn dispatch(&self, round: usize, call: ToolCallRequest) -> AgentStep {
        let ToolCallRequest {
            call_id,
            tool_name,
            arguments,
        } = call;
        let (success, output) = match self.invoker.invoke(&tool_name, &arguments).await {
            Ok(text) => (true, text),
            Err(err) => (false, err.to_string()),
        };
        info!(
            round,
            tool = tool_name.as_str(),
            call_id = call_id.as_str(),
            success,
            "Tool call completed"
        );
        AgentStep {
            round,
            call_id,
            tool: tool_name,
            arguments,
            success,
            output,
        }
    }
}
