// End-to-end tests: the real stratus-weather binary behind McpProcess

use async_trait::async_trait;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use stratus_core::catalog::fetch_catalog;
use stratus_core::config::ServerConfig;
use stratus_core::model::{ModelError, ReasoningEngine};
use stratus_core::tooling::{HostError, McpProcess, ToolHost};
use stratus_core::types::{
    AssistantMessage, ToolArguments, ToolCallRequest, ToolCatalog, Turn,
};
use stratus_core::{Assistant, SessionOptions};

fn weather_server() -> McpProcess {
    McpProcess::new(ServerConfig {
        name: "weather".into(),
        command: PathBuf::from(env!("CARGO_BIN_EXE_stratus-weather")),
        request_timeout: Duration::from_secs(10),
        ..ServerConfig::default()
    })
}

#[tokio::test]
async fn catalog_comes_from_the_running_server() {
    let server = weather_server();

    let catalog = fetch_catalog(&server, "city").await.expect("catalog");

    assert_eq!(
        catalog.names(),
        vec!["get_current_weather", "get_forecast", "list_available_cities"]
    );
    let weather = catalog.get("get_current_weather").expect("weather tool");
    assert_eq!(weather.parameters.len(), 1);
    assert_eq!(weather.parameters[0].name, "city");
    assert!(weather.parameters[0].required);
    assert!(
        catalog
            .get("list_available_cities")
            .expect("list tool")
            .parameters
            .is_empty()
    );
    assert!(server.instructions().await.is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn tool_text_is_returned_verbatim() {
    let server = weather_server();

    let text = server
        .call_tool("get_forecast", json!({"city": "sydney"}))
        .await
        .expect("forecast");
    let report: serde_json::Value = serde_json::from_str(&text).expect("json text");
    assert_eq!(report["city"], "Sydney");
    assert_eq!(report["forecast"][4]["condition"], "Cloudy");

    let missing = server
        .call_tool("get_current_weather", json!({"city": "berlin"}))
        .await
        .expect("error payload is still text");
    assert!(missing.contains("Weather data not available for 'berlin'"));

    server.shutdown().await;
}

#[tokio::test]
async fn calls_after_shutdown_restart_the_server() {
    let server = weather_server();
    server.list_tools().await.expect("first start");
    server.shutdown().await;

    let tools = server.list_tools().await.expect("restarted");
    assert_eq!(tools.len(), 3);
    server.shutdown().await;
}

/// Looks up Tokyo on the first round, then answers with what the tool said.
struct TokyoEngine {
    calls: AtomicUsize,
}

#[async_trait]
impl ReasoningEngine for TokyoEngine {
    fn id(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        turns: &[Turn],
        catalog: &ToolCatalog,
    ) -> Result<AssistantMessage, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(Turn::ToolResult(result)) = turns.last() {
            let report: serde_json::Value = serde_json::from_str(&result.text)
                .map_err(|err| ModelError::invalid_response("scripted", err.to_string()))?;
            return Ok(AssistantMessage::text(format!(
                "It's {}°F in {}.",
                report["temperature"], report["city"].as_str().unwrap_or_default()
            )));
        }
        assert!(catalog.contains("get_current_weather"));
        Ok(AssistantMessage::with_tool_calls(
            "",
            vec![ToolCallRequest::new(
                "toolu_1",
                "get_current_weather",
                ToolArguments::from([("city".to_string(), "tokyo".to_string())]),
            )],
        ))
    }
}

#[tokio::test]
async fn assistant_answers_through_the_real_server() {
    let host: Arc<dyn ToolHost> = Arc::new(weather_server());
    let engine = TokyoEngine {
        calls: AtomicUsize::new(0),
    };
    let assistant = Assistant::connect(engine, host, SessionOptions::default())
        .await
        .expect("session");

    let answer = assistant
        .ask("What's the weather in Tokyo?")
        .await
        .expect("answer");

    assert_eq!(answer, "It's 68°F in Tokyo.");
    assert_eq!(assistant.engine().calls.load(Ordering::SeqCst), 2);
    assistant.shutdown().await;
}

#[tokio::test]
async fn missing_binary_is_a_spawn_error() {
    let server = McpProcess::new(ServerConfig {
        command: PathBuf::from("/definitely/not/here/stratus-weather"),
        ..ServerConfig::default()
    });

    let result = server.list_tools().await;
    assert!(matches!(result, Err(HostError::Spawn { .. })));
}
