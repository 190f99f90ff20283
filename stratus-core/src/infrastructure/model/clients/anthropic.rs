//! Anthropic Messages API client with native tool use

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::EngineConfig;
use crate::constants::ANTHROPIC_API_VERSION;
use crate::infrastructure::model::adapter::{CatalogAdapter, TurnAdapter};
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::ReasoningEngine;
use crate::infrastructure::model::types::ModelError;
use crate::types::{AssistantMessage, ToolCallRequest, ToolCatalog, Turn, coerce_arguments};

#[derive(Clone)]
pub struct AnthropicClient {
    base: HttpClientBase,
    model: String,
    max_tokens: u32,
    api_path: String,
}

impl AnthropicClient {
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
                .unwrap_or_else(|| "/v1/messages".to_string()),
        }
    }
}

#[async_trait]
impl ReasoningEngine for AnthropicClient {
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
        let (system, messages) = TurnAdapter::to_anthropic_format(turns);
        let tools = CatalogAdapter::to_anthropic_tools(catalog);

        let payload = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
            tools,
        };

        info!(
            provider = self.base.id.as_str(),
            model = self.model.as_str(),
            turns = turns.len(),
            tools = catalog.len(),
            "Sending request to Anthropic"
        );

        let response: AnthropicResponse = self
            .base
            .post_with_key_header(
                &url,
                "x-api-key",
                &[("anthropic-version", ANTHROPIC_API_VERSION)],
                &payload,
            )
            .await?;
        debug!(
            stop_reason = response.stop_reason.as_deref().unwrap_or("unknown"),
            "Received response from Anthropic"
        );

        parse_response(&self.base.id, response)
    }
}

fn parse_response(
    provider: &str,
    response: AnthropicResponse,
) -> Result<AssistantMessage, ModelError> {
    // An empty `end_turn` reply is a final answer with no text.
    if response.content.is_empty() && response.stop_reason.is_none() {
        return Err(ModelError::invalid_response(provider, "empty content"));
    }

    let mut text_parts = Vec::new();
    let mut tool_calls = Vec::new();
    for block in response.content {
        match block.block_type.as_str() {
            "text" => {
                if let Some(text) = block.text {
                    text_parts.push(text);
                }
            }
            "tool_use" => {
                let (Some(id), Some(name)) = (block.id, block.name) else {
                    return Err(ModelError::invalid_response(
                        provider,
                        "tool_use block without id or name",
                    ));
                };
                let input = block.input.unwrap_or(Value::Null);
                tool_calls.push(ToolCallRequest::new(id, name, coerce_arguments(&input)));
            }
            other => debug!(block_type = other, "Ignoring Anthropic content block"),
        }
    }

    Ok(AssistantMessage::with_tool_calls(text_parts.join(""), tool_calls))
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<Value>,
}
