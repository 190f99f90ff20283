//! Newline-delimited JSON-RPC loop
//!
//! Each request line gets exactly one response line. Notifications get none.

use crate::tools::{call_tool, tool_definitions};
use serde_json::{Value, json};
use stratus_core::constants::PROTOCOL_VERSION;
use stratus_core::rpc::{RpcRequest, RpcResponse};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "weather-service";

const INSTRUCTIONS: &str =
    "City names are matched case-insensitively. Call list_available_cities when unsure which cities exist.";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("stdio error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct WeatherServer {
    initialized: bool,
}

impl WeatherServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one raw line; `None` means nothing should be written back.
    pub fn handle_line(&mut self, line: &str) -> Option<RpcResponse> {
        let request: RpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(err) => {
                warn!(%err, "Rejecting malformed request");
                return Some(RpcResponse::parse_error(format!("Invalid JSON-RPC message: {err}")));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request.method);
            return None;
        }
        if request.jsonrpc != "2.0" {
            return Some(RpcResponse::invalid_request(
                request.id,
                "Unsupported jsonrpc version (expected 2.0)",
            ));
        }

        debug!(method = request.method.as_str(), "Handling request");
        let id = request.id.clone();
        let response = match request.method.as_str() {
            "initialize" => RpcResponse::success(id, self.initialize(request.params.as_ref())),
            "ping" => RpcResponse::success(id, json!({})),
            "tools/list" => RpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => handle_call(id, request.params.as_ref()),
            other => {
                warn!(method = other, "Unknown method");
                RpcResponse::method_not_found(id, other)
            }
        };
        Some(response)
    }

    fn initialize(&mut self, params: Option<&Value>) -> Value {
        let requested = params
            .and_then(|params| params.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION);
        self.initialized = true;
        info!(protocol = requested, "Client initialized session");
        json!({
            "protocolVersion": requested,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": INSTRUCTIONS
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" if !self.initialized => {
                warn!("initialized notification arrived before initialize")
            }
            other => debug!(method = other, "Notification received"),
        }
    }
}

fn handle_call(id: Option<Value>, params: Option<&Value>) -> RpcResponse {
    let Some(name) = params
        .and_then(|params| params.get("name"))
        .and_then(Value::as_str)
    else {
        return RpcResponse::invalid_params(id, "params.name must be a string");
    };
    let empty = json!({});
    let arguments = params
        .and_then(|params| params.get("arguments"))
        .filter(|arguments| !arguments.is_null())
        .unwrap_or(&empty);

    let (text, is_error) = match call_tool(name, arguments) {
        Ok(text) => (text, false),
        Err(err) => {
            debug!(tool = name, %err, "Tool answered with an error payload");
            (err.to_payload(), err.is_fault())
        }
    };
    info!(tool = name, is_error, "Tool call handled");
    RpcResponse::success(
        id,
        json!({
            "content": [{ "type": "text", "text": text }],
            "isError": is_error
        }),
    )
}

/// Serve requests from `input` until it closes.
pub async fn serve<R, W>(input: R, mut output: W) -> Result<(), ServerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut server = WeatherServer::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(response) = server.handle_line(trimmed) {
            let mut encoded = serde_json::to_string(&response)?;
            encoded.push('\n');
            output.write_all(encoded.as_bytes()).await?;
            output.flush().await?;
        }
    }
    info!("Input closed, shutting down");
    Ok(())
}
