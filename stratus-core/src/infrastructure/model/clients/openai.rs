//! OpenAI-compatible client implementation (OpenAI, Groq, Ollama's `/v1`, ...)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::base::HttpClientBase;
use crate::config::EngineConfig;
use crate::infrastructure::model::adapter::{CatalogAdapter, TurnAdapter};
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::ReasoningEngine;
use crate::infrastructure::model::types::ModelError;
use crate::types::{AssistantMessage, ToolCallRequest, ToolCatalog, Turn, coerce_arguments};

#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
    model: String,
    max_tokens: u32,
    api_path: String,
}

impl OpenAIClient {
    pub fn from_config(config: &EngineConfig) -> Self {
        let provider = config.kind.as_str().to_string();
        let api_key = resolve_api_key(&provider, config.api_key_env.as_deref());
        Self {
            base: HttpClientBase::new(provider, config.endpoint.clone(), api_key),
            model: config.resolved_model(),
            max_tokens: config.max_tokens,
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| "/v1/chat/completions".to_string()),
        }
    }
}

#[async_trait]
impl ReasoningEngine for OpenAIClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        turns: &[Turn],
        catalog: &ToolCatalog,
    ) -> Result<AssistantMessage, ModelError> {
        let url = self.base.build_url(&self.api_path);

        let payload = OpenAIRequest {
            model: &self.model,
            messages: TurnAdapter::to_openai_format(turns),
            tools: CatalogAdapter::to_openai_tools(catalog),
            max_tokens: self.max_tokens,
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = self.model.as_str(),
            turns = turns.len(),
            tools = catalog.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_with_optional_bearer(&url, &payload).await?;
        debug!("Received response from OpenAI-compatible provider");

        parse_response(&self.base.id, response)
    }
}

fn parse_response(provider: &str, response: OpenAIResponse) -> Result<AssistantMessage, ModelError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .ok_or_else(|| ModelError::invalid_response(provider, "missing message"))?;

    let mut tool_calls = Vec::new();
    for call in message.tool_calls.unwrap_or_default() {
        let arguments = match serde_json::from_str::<Value>(&call.function.arguments) {
            Ok(value) => coerce_arguments(&value),
            Err(err) if call.function.arguments.trim().is_empty() => {
                debug!(%err, "Tool call carried no arguments");
                Default::default()
            }
            Err(err) => {
                warn!(tool = %call.function.name, %err, "Tool call arguments are not valid JSON");
                return Err(ModelError::invalid_response(
                    provider,
                    format!("arguments for '{}' are not valid JSON", call.function.name),
                ));
            }
        };
        tool_calls.push(ToolCallRequest::new(call.id, call.function.name, arguments));
    }

    Ok(AssistantMessage::with_tool_calls(
        message.content.unwrap_or_default(),
        tool_calls,
    ))
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Deserialize)]
struct OpenAIToolCall {
    id: String,
    function: OpenAIFunction,
}

#[derive(Deserialize)]
struct OpenAIFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}
