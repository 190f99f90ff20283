use super::{AgentError, OrchestrationOutcome, Orchestrator};
use crate::application::invoker::ToolInvoker;
use crate::application::tooling::{HostError, RemoteTool, ToolHost};
use crate::constants::MAX_ROUNDS;
use crate::conversation::ConversationLog;
use crate::model::{ModelError, ReasoningEngine};
use crate::types::{
    AssistantMessage, OrchestrationResult, ParameterSpec, ToolArguments, ToolCallRequest,
    ToolCatalog, ToolDescriptor, Turn,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted replies; once the script runs out it keeps asking for a tool.
#[derive(Default)]
struct ScriptedEngine {
    replies: Mutex<VecDeque<AssistantMessage>>,
    calls: Mutex<usize>,
    seen: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedEngine {
    fn new(replies: Vec<AssistantMessage>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("lock")
    }
}

#[async_trait]
impl ReasoningEngine for ScriptedEngine {
    fn id(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(
        &self,
        turns: &[Turn],
        _catalog: &ToolCatalog,
    ) -> Result<AssistantMessage, ModelError> {
        let round = {
            let mut calls = self.calls.lock().expect("lock");
            *calls += 1;
            *calls
        };
        self.seen.lock().expect("lock").push(turns.to_vec());
        let next = self.replies.lock().expect("lock").pop_front();
        Ok(next.unwrap_or_else(|| {
            AssistantMessage::with_tool_calls(
                "",
                vec![ToolCallRequest::new(
                    format!("call_{round}"),
                    "get_current_weather",
                    city("tokyo"),
                )],
            )
        }))
    }
}

struct FailingEngine;

#[async_trait]
impl ReasoningEngine for FailingEngine {
    fn id(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "none"
    }

    async fn complete(
        &self,
        _turns: &[Turn],
        _catalog: &ToolCatalog,
    ) -> Result<AssistantMessage, ModelError> {
        Err(ModelError::invalid_response("failing", "no content"))
    }
}

#[derive(Default)]
struct StubHost {
    invocations: Mutex<Vec<String>>,
}

#[async_trait]
impl ToolHost for StubHost {
    async fn list_tools(&self) -> Result<Vec<RemoteTool>, HostError> {
        Ok(Vec::new())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, HostError> {
        self.invocations.lock().expect("lock").push(name.to_string());
        match (name, arguments.get("city").and_then(Value::as_str)) {
            ("get_forecast", _) => Err(HostError::ToolReported {
                tool: name.to_string(),
                message: "forecast service down".into(),
            }),
            (_, Some(city)) => Ok(format!(
                r#"{{"city":"{city}","temperature":68,"condition":"Sunny"}}"#
            )),
            _ => Ok("{}".into()),
        }
    }
}

fn city(name: &str) -> ToolArguments {
    ToolArguments::from([("city".to_string(), name.to_string())])
}

fn catalog() -> ToolCatalog {
    let (catalog, _) = ToolCatalog::from_descriptors(vec![
        ToolDescriptor::new(
            "get_current_weather",
            "Current conditions",
            vec![ParameterSpec::required("city", "City name")],
        ),
        ToolDescriptor::new(
            "get_forecast",
            "Forecast",
            vec![ParameterSpec::required("city", "City name")],
        ),
    ]);
    catalog
}

struct Fixture {
    catalog: ToolCatalog,
    host: Arc<StubHost>,
    invoker: ToolInvoker,
}

impl Fixture {
    fn new() -> Self {
        let catalog = catalog();
        let host = Arc::new(StubHost::default());
        let invoker = ToolInvoker::new(Arc::new(catalog.clone()), host.clone());
        Self {
            catalog,
            host,
            invoker,
        }
    }

    async fn run<E: ReasoningEngine>(
        &self,
        engine: &E,
        question: &str,
    ) -> Result<OrchestrationOutcome, AgentError> {
        Orchestrator::new(engine, &self.catalog, &self.invoker)
            .run(ConversationLog::seeded("system", question))
            .await
    }

    fn host_calls(&self) -> usize {
        self.host.invocations.lock().expect("lock").len()
    }
}

fn tool_results(log: &ConversationLog) -> Vec<(String, String)> {
    log.snapshot()
        .iter()
        .filter_map(|turn| match turn {
            Turn::ToolResult(result) => Some((result.call_id.clone(), result.text.clone())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn immediate_answer_needs_one_round() {
    let fixture = Fixture::new();
    let engine = ScriptedEngine::new(vec![AssistantMessage::text("Paris: Cloudy")]);

    let outcome = fixture
        .run(&engine, "weather in Paris?")
        .await
        .expect("outcome");

    assert_eq!(
        outcome.result,
        OrchestrationResult::FinalAnswer("Paris: Cloudy".into())
    );
    assert_eq!(outcome.rounds, 1);
    assert_eq!(engine.calls(), 1);
    assert!(outcome.steps.is_empty());
    assert_eq!(fixture.host_calls(), 0);
}

#[tokio::test]
async fn empty_reply_without_tool_calls_is_final() {
    let fixture = Fixture::new();
    let engine = ScriptedEngine::new(vec![AssistantMessage::text("")]);

    let outcome = fixture.run(&engine, "anything?").await.expect("outcome");

    assert_eq!(outcome.result, OrchestrationResult::FinalAnswer(String::new()));
    assert_eq!(outcome.rounds, 1);
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn tool_round_then_answer() {
    let fixture = Fixture::new();
    let engine = ScriptedEngine::new(vec![
        AssistantMessage::with_tool_calls(
            "",
            vec![ToolCallRequest::new(
                "toolu_1",
                "get_current_weather",
                city("tokyo"),
            )],
        ),
        AssistantMessage::text("It's 68°F in Tokyo."),
    ]);

    let outcome = fixture
        .run(&engine, "How's Tokyo?")
        .await
        .expect("outcome");

    assert_eq!(outcome.answer(), Some("It's 68°F in Tokyo."));
    assert_eq!(engine.calls(), 2);
    assert_eq!(outcome.steps.len(), 1);
    assert!(outcome.steps[0].success);

    let seen = engine.seen.lock().expect("lock");
    let second_round = &seen[1];
    let Some(Turn::ToolResult(result)) = second_round.last() else {
        panic!("engine should see the tool result last");
    };
    assert_eq!(result.call_id, "toolu_1");
    assert!(result.text.contains("\"temperature\":68"));
}

#[tokio::test]
async fn every_request_gets_one_result_in_order() {
    let fixture = Fixture::new();
    let engine = ScriptedEngine::new(vec![
        AssistantMessage::with_tool_calls(
            "Comparing.",
            vec![
                ToolCallRequest::new("a", "get_current_weather", city("new york")),
                ToolCallRequest::new("b", "get_current_weather", city("london")),
                ToolCallRequest::new("c", "get_current_weather", city("sydney")),
            ],
        ),
        AssistantMessage::text("New York is warmest."),
    ]);

    let outcome = fixture.run(&engine, "compare").await.expect("outcome");

    let ids: Vec<String> = tool_results(&outcome.log)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(fixture.host_calls(), 3);
    let roles: Vec<&str> = outcome.log.snapshot().iter().map(Turn::role).collect();
    assert_eq!(
        roles,
        vec!["system", "user", "assistant", "tool", "tool", "tool", "assistant"]
    );
}

#[tokio::test]
async fn tool_failures_become_result_text() {
    let fixture = Fixture::new();
    let engine = ScriptedEngine::new(vec![
        AssistantMessage::with_tool_calls(
            "",
            vec![
                ToolCallRequest::new("x", "get_stock_price", ToolArguments::new()),
                ToolCallRequest::new("y", "get_forecast", city("paris")),
            ],
        ),
        AssistantMessage::text("Sorry, that data is unavailable."),
    ]);

    let outcome = fixture.run(&engine, "stocks?").await.expect("outcome");

    let results = tool_results(&outcome.log);
    assert_eq!(results[0].1, "Tool get_stock_price not found");
    assert_eq!(results[1].1, "Error executing tool: forecast service down");
    assert!(outcome.steps.iter().all(|step| !step.success));
    // the unknown tool never reached the host
    assert_eq!(fixture.host_calls(), 1);
    assert_eq!(outcome.answer(), Some("Sorry, that data is unavailable."));
}

#[tokio::test]
async fn endless_tool_requests_stop_at_round_cap() {
    let fixture = Fixture::new();
    let engine = ScriptedEngine::new(Vec::new());

    let outcome = fixture.run(&engine, "loop forever").await.expect("outcome");

    assert_eq!(outcome.result, OrchestrationResult::RoundLimitExceeded);
    assert_eq!(engine.calls(), MAX_ROUNDS);
    assert_eq!(outcome.rounds, MAX_ROUNDS);
    // round 10's request is still answered so the log stays well-formed
    assert_eq!(outcome.steps.len(), MAX_ROUNDS);
    assert!(outcome.log.pending_calls().is_empty());
    assert_eq!(outcome.answer(), None);
}

#[tokio::test]
async fn answer_on_last_round_is_accepted() {
    let fixture = Fixture::new();
    let mut replies: Vec<AssistantMessage> = (1..MAX_ROUNDS)
        .map(|round| {
            AssistantMessage::with_tool_calls(
                "",
                vec![ToolCallRequest::new(
                    format!("r{round}"),
                    "get_current_weather",
                    city("paris"),
                )],
            )
        })
        .collect();
    replies.push(AssistantMessage::text("Finally: Paris is sunny."));
    let engine = ScriptedEngine::new(replies);

    let outcome = fixture.run(&engine, "paris").await.expect("outcome");

    assert_eq!(outcome.answer(), Some("Finally: Paris is sunny."));
    assert_eq!(engine.calls(), MAX_ROUNDS);
}

#[tokio::test]
async fn engine_failure_is_not_swallowed() {
    let fixture = Fixture::new();

    let err = fixture
        .run(&FailingEngine, "anything")
        .await
        .expect_err("engine error propagates");

    assert!(matches!(
        err,
        AgentError::Engine(ModelError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn duplicate_call_ids_abort_the_run() {
    let fixture = Fixture::new();
    let engine = ScriptedEngine::new(vec![AssistantMessage::with_tool_calls(
        "",
        vec![
            ToolCallRequest::new("same", "get_current_weather", city("tokyo")),
            ToolCallRequest::new("same", "get_current_weather", city("paris")),
        ],
    )]);

    let err = fixture
        .run(&engine, "two")
        .await
        .expect_err("invariant violation");

    assert!(matches!(err, AgentError::Conversation(_)));
    assert_eq!(fixture.host_calls(), 0);
}
