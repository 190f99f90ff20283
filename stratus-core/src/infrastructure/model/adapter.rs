//! Turn adapters - convert the conversation log and catalog to API formats

use crate::types::{ToolCatalog, Turn, arguments_to_json};
use serde_json::{Value, json};

/// Adapter for converting turns to different API formats
pub struct TurnAdapter;

impl TurnAdapter {
    /// Convert turns to Anthropic Messages format.
    ///
    /// Returns `(system_text, messages)`. System turns are lifted into the
    /// top-level `system` field; consecutive tool results are merged into a
    /// single `user` message of `tool_result` blocks, which is what the API
    /// expects after an assistant message with several `tool_use` blocks.
    pub fn to_anthropic_format(turns: &[Turn]) -> (Option<String>, Vec<Value>) {
        let mut system_parts = Vec::new();
        let mut messages: Vec<Value> = Vec::new();
        let mut pending_results: Vec<Value> = Vec::new();

        for turn in turns {
            if !matches!(turn, Turn::ToolResult(_)) && !pending_results.is_empty() {
                messages.push(json!({
                    "role": "user",
                    "content": std::mem::take(&mut pending_results),
                }));
            }
            match turn {
                Turn::System(text) => system_parts.push(text.clone()),
                Turn::User(text) => messages.push(json!({
                    "role": "user",
                    "content": [{"type": "text", "text": text}],
                })),
                Turn::Assistant(message) => {
                    let mut content = Vec::new();
                    if !message.text.trim().is_empty() {
                        content.push(json!({"type": "text", "text": message.text}));
                    }
                    for call in &message.tool_calls {
                        content.push(json!({
                            "type": "tool_use",
                            "id": call.call_id,
                            "name": call.tool_name,
                            "input": arguments_to_json(&call.arguments),
                        }));
                    }
                    messages.push(json!({"role": "assistant", "content": content}));
                }
                Turn::ToolResult(result) => pending_results.push(json!({
                    "type": "tool_result",
                    "tool_use_id": result.call_id,
                    "content": result.text,
                })),
            }
        }
        if !pending_results.is_empty() {
            messages.push(json!({"role": "user", "content": pending_results}));
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };
        (system, messages)
    }

    /// Convert turns to OpenAI chat-completions format.
    pub fn to_openai_format(turns: &[Turn]) -> Vec<Value> {
        turns
            .iter()
            .map(|turn| match turn {
                Turn::System(text) => json!({"role": "system", "content": text}),
                Turn::User(text) => json!({"role": "user", "content": text}),
                Turn::Assistant(message) if message.tool_calls.is_empty() => {
                    json!({"role": "assistant", "content": message.text})
                }
                Turn::Assistant(message) => {
                    let calls: Vec<Value> = message
                        .tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "id": call.call_id,
                                "type": "function",
                                "function": {
                                    "name": call.tool_name,
                                    "arguments": arguments_to_json(&call.arguments).to_string(),
                                },
                            })
                        })
                        .collect();
                    let content = if message.text.is_empty() {
                        Value::Null
                    } else {
                        Value::String(message.text.clone())
                    };
                    json!({"role": "assistant", "content": content, "tool_calls": calls})
                }
                Turn::ToolResult(result) => json!({
                    "role": "tool",
                    "tool_call_id": result.call_id,
                    "content": result.text,
                }),
            })
            .collect()
    }
}

/// Adapter for rendering the tool catalog as provider tool definitions
pub struct CatalogAdapter;

impl CatalogAdapter {
    pub fn to_anthropic_tools(catalog: &ToolCatalog) -> Vec<Value> {
        catalog
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "input_schema": tool.input_schema(),
                })
            })
            .collect()
    }

    pub fn to_openai_tools(catalog: &ToolCatalog) -> Vec<Value> {
        catalog
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.input_schema(),
                    },
                })
            })
            .collect()
    }
}
