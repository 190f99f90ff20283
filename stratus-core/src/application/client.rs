use super::agent::{AgentError, OrchestrationOutcome, Orchestrator};
use super::catalog::{CatalogError, fetch_catalog};
use super::conversation::{ConversationLog, compose_system_turn};
use super::invoker::ToolInvoker;
use super::tooling::ToolHost;
use crate::config::AppConfig;
use crate::constants::{DEFAULT_SUBJECT_FIELD, DEFAULT_SUBJECTS, ROUND_LIMIT_MESSAGE};
use crate::model::ReasoningEngine;
use crate::types::{OrchestrationResult, ToolCatalog};
use std::sync::Arc;
use tracing::{debug, info};

/// Per-session knobs that shape the catalog and the system turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub subject_field: String,
    pub subjects: Vec<String>,
    pub system_prompt: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            subject_field: DEFAULT_SUBJECT_FIELD.to_string(),
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
            system_prompt: None,
        }
    }
}

impl From<&AppConfig> for SessionOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            subject_field: config.subject_field.clone(),
            subjects: config.subjects.clone(),
            system_prompt: config.system_prompt.clone(),
        }
    }
}

/// A session bound to one engine and one tool host.
///
/// The catalog is fetched once in [`connect`](Self::connect) and reused by
/// every [`ask`](Self::ask); each question gets its own conversation log.
pub struct Assistant<E: ReasoningEngine> {
    engine: E,
    host: Arc<dyn ToolHost>,
    catalog: Arc<ToolCatalog>,
    invoker: ToolInvoker,
    system_turn: String,
}

impl<E: ReasoningEngine> Assistant<E> {
    pub async fn connect(
        engine: E,
        host: Arc<dyn ToolHost>,
        options: SessionOptions,
    ) -> Result<Self, CatalogError> {
        let catalog = Arc::new(fetch_catalog(host.as_ref(), &options.subject_field).await?);
        let guidance = host.instructions().await;
        let system_turn = compose_system_turn(
            options.system_prompt.as_deref(),
            &options.subjects,
            guidance.as_deref(),
        );
        let invoker = ToolInvoker::new(Arc::clone(&catalog), Arc::clone(&host));

        info!(
            provider = engine.id(),
            model = engine.model(),
            tools = catalog.len(),
            "Assistant session ready"
        );
        Ok(Self {
            engine,
            host,
            catalog,
            invoker,
            system_turn,
        })
    }

    /// Answer a question, or return the apology text if the round cap is hit.
    pub async fn ask(&self, question: &str) -> Result<String, AgentError> {
        let outcome = self.ask_detailed(question).await?;
        Ok(match outcome.result {
            OrchestrationResult::FinalAnswer(text) => text,
            OrchestrationResult::RoundLimitExceeded => ROUND_LIMIT_MESSAGE.to_string(),
        })
    }

    /// Run one question and keep the full record of what happened.
    pub async fn ask_detailed(&self, question: &str) -> Result<OrchestrationOutcome, AgentError> {
        debug!(chars = question.chars().count(), "Question received");
        let log = ConversationLog::seeded(self.system_turn.clone(), question);
        Orchestrator::new(&self.engine, &self.catalog, &self.invoker)
            .run(log)
            .await
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn model(&self) -> &str {
        self.engine.model()
    }

    /// Stop the tool host. The session must not be used afterwards.
    pub async fn shutdown(&self) {
        self.host.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tooling::{HostError, RemoteTool};
    use crate::model::ModelError;
    use crate::types::{AssistantMessage, ToolArguments, ToolCallRequest, Turn};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct WeatherHost {
        guidance: Option<String>,
        listings: AtomicUsize,
    }

    impl WeatherHost {
        fn new(guidance: Option<&str>) -> Self {
            Self {
                guidance: guidance.map(str::to_string),
                listings: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ToolHost for WeatherHost {
        async fn list_tools(&self) -> Result<Vec<RemoteTool>, HostError> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            Ok(vec![RemoteTool {
                name: "get_current_weather".into(),
                description: Some("Get current weather".into()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {"city": {"type": "string"}},
                    "required": ["city"]
                })),
            }])
        }

        async fn call_tool(&self, _name: &str, arguments: Value) -> Result<String, HostError> {
            let city = arguments["city"].as_str().unwrap_or_default();
            Ok(format!(r#"{{"city":"{city}","temperature":68}}"#))
        }

        async fn instructions(&self) -> Option<String> {
            self.guidance.clone()
        }
    }

    struct EmptyHost;

    #[async_trait]
    impl ToolHost for EmptyHost {
        async fn list_tools(&self) -> Result<Vec<RemoteTool>, HostError> {
            Err(HostError::Transport {
                server: "weather".into(),
                message: "broken pipe".into(),
            })
        }

        async fn call_tool(&self, _name: &str, _arguments: Value) -> Result<String, HostError> {
            Ok(String::new())
        }
    }

    /// Asks for the weather on its first turn of each question, then answers.
    #[derive(Default)]
    struct WeatherEngine {
        calls: Mutex<usize>,
        loop_forever: bool,
    }

    #[async_trait]
    impl ReasoningEngine for WeatherEngine {
        fn id(&self) -> &str {
            "test"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn complete(
            &self,
            turns: &[Turn],
            _catalog: &ToolCatalog,
        ) -> Result<AssistantMessage, ModelError> {
            *self.calls.lock().expect("lock") += 1;
            let last_result = match turns.last() {
                Some(Turn::ToolResult(result)) => Some(result.text.clone()),
                _ => None,
            };
            match last_result {
                Some(text) if !self.loop_forever => Ok(AssistantMessage::text(format!(
                    "Result: {text}"
                ))),
                _ => Ok(AssistantMessage::with_tool_calls(
                    "",
                    vec![ToolCallRequest::new(
                        format!("call_{}", turns.len()),
                        "get_current_weather",
                        ToolArguments::from([("city".to_string(), "tokyo".to_string())]),
                    )],
                )),
            }
        }
    }

    #[tokio::test]
    async fn connect_fetches_catalog_once() {
        let host = Arc::new(WeatherHost::new(None));
        let assistant = Assistant::connect(
            WeatherEngine::default(),
            host.clone(),
            SessionOptions::default(),
        )
        .await
        .expect("session");

        assistant.ask("Tokyo?").await.expect("first");
        assistant.ask("Tokyo again?").await.expect("second");

        assert_eq!(host.listings.load(Ordering::SeqCst), 1);
        assert_eq!(assistant.catalog().names(), vec!["get_current_weather"]);
        assert_eq!(assistant.model(), "test-model");
    }

    #[tokio::test]
    async fn ask_returns_final_text() {
        let assistant = Assistant::connect(
            WeatherEngine::default(),
            Arc::new(WeatherHost::new(None)),
            SessionOptions::default(),
        )
        .await
        .expect("session");

        let answer = assistant.ask("How's Tokyo?").await.expect("answer");
        assert_eq!(answer, r#"Result: {"city":"tokyo","temperature":68}"#);
        assert_eq!(*assistant.engine().calls.lock().expect("lock"), 2);
    }

    #[tokio::test]
    async fn round_limit_becomes_apology() {
        let engine = WeatherEngine {
            loop_forever: true,
            ..WeatherEngine::default()
        };
        let assistant = Assistant::connect(
            engine,
            Arc::new(WeatherHost::new(None)),
            SessionOptions::default(),
        )
        .await
        .expect("session");

        let answer = assistant.ask("loop").await.expect("answer");
        assert_eq!(
            answer,
            "Sorry, I couldn't process your request. Please try again."
        );
        assert_eq!(*assistant.engine().calls.lock().expect("lock"), 10);
    }

    #[tokio::test]
    async fn each_question_starts_a_fresh_log() {
        let assistant = Assistant::connect(
            WeatherEngine::default(),
            Arc::new(WeatherHost::new(Some("Cities are case-insensitive."))),
            SessionOptions {
                subjects: vec!["Tokyo".into()],
                ..SessionOptions::default()
            },
        )
        .await
        .expect("session");

        assistant.ask("first").await.expect("first");
        let outcome = assistant.ask_detailed("second").await.expect("second");

        let snapshot = outcome.log.snapshot();
        assert!(matches!(&snapshot[1], Turn::User(text) if text == "second"));
        assert_eq!(
            snapshot
                .iter()
                .filter(|turn| matches!(turn, Turn::User(_)))
                .count(),
            1
        );
        let Turn::System(system) = &snapshot[0] else {
            panic!("first turn must be the system turn");
        };
        assert!(system.contains("Available cities: Tokyo"));
        assert!(system.ends_with("Cities are case-insensitive."));
    }

    #[tokio::test]
    async fn catalog_failure_aborts_connect() {
        let result = Assistant::connect(
            WeatherEngine::default(),
            Arc::new(EmptyHost),
            SessionOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(CatalogError::CatalogUnavailable(_))));
    }
}
