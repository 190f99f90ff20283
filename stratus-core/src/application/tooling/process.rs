use super::error::HostError;
use super::interface::{RemoteTool, ToolHost};
use crate::config::ServerConfig;
use crate::constants::PROTOCOL_VERSION;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex as AsyncMutex, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// An MCP server running as a child process, spoken to over stdio.
///
/// Requests are newline-delimited JSON-RPC messages; responses are matched to
/// callers by id, so the handle can be shared across tasks.
#[derive(Clone)]
pub struct McpProcess {
    inner: Arc<McpProcessInner>,
}

struct McpProcessInner {
    server: ServerConfig,
    // Held from the running check through the handshake.
    spawn_lock: AsyncMutex<()>,
    state: AsyncMutex<Option<RunningState>>,
    writer: AsyncMutex<Option<BufWriter<ChildStdin>>>,
    pending: AsyncMutex<HashMap<String, oneshot::Sender<Result<Value, HostError>>>>,
    id_counter: AtomicU64,
    generation: AtomicU64,
    instructions: AsyncMutex<Option<String>>,
}

struct RunningState {
    child: Child,
}

impl McpProcess {
    pub fn new(server: ServerConfig) -> Self {
        Self {
            inner: Arc::new(McpProcessInner {
                server,
                spawn_lock: AsyncMutex::new(()),
                state: AsyncMutex::new(None),
                writer: AsyncMutex::new(None),
                pending: AsyncMutex::new(HashMap::new()),
                id_counter: AtomicU64::new(1),
                generation: AtomicU64::new(0),
                instructions: AsyncMutex::new(None),
            }),
        }
    }

    /// Spawn the server and run the initialize handshake if not already running.
    pub async fn ensure_running(&self) -> Result<(), HostError> {
        self.inner.ensure_running().await
    }
}

#[async_trait]
impl ToolHost for McpProcess {
    async fn list_tools(&self) -> Result<Vec<RemoteTool>, HostError> {
        self.ensure_running().await?;
        let result = self.inner.send_request("tools/list", json!({})).await?;
        Ok(parse_tool_listing(&result))
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, HostError> {
        self.ensure_running().await?;
        let arguments = match arguments {
            Value::Null => json!({}),
            other => other,
        };
        let params = json!({ "name": name, "arguments": arguments });
        let result = self.inner.send_request("tools/call", params).await?;
        let text = extract_text(&result);
        if result
            .get("isError")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Err(HostError::ToolReported {
                tool: name.to_string(),
                message: if text.is_empty() {
                    format!("tool '{name}' reported an error")
                } else {
                    text
                },
            });
        }
        Ok(text)
    }

    async fn instructions(&self) -> Option<String> {
        self.inner.instructions.lock().await.clone()
    }

    async fn shutdown(&self) {
        self.inner.reset().await;
    }
}

impl McpProcessInner {
    async fn ensure_running(self: &Arc<Self>) -> Result<(), HostError> {
        let _spawning = self.spawn_lock.lock().await;
        if self.state.lock().await.is_some() {
            return Ok(());
        }

        let mut command = Command::new(&self.server.command);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &self.server.workdir {
            command.current_dir(dir);
        }
        if !self.server.args.is_empty() {
            command.args(&self.server.args);
        }
        for (key, value) in &self.server.env {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|source| HostError::Spawn {
            server: self.server.name.clone(),
            source,
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.transport_error("failed to capture server stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.transport_error("failed to capture server stdout"))?;

        {
            let mut writer = self.writer.lock().await;
            *writer = Some(BufWriter::new(stdin));
        }

        {
            let mut state = self.state.lock().await;
            *state = Some(RunningState { child });
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let reader_self = Arc::clone(self);
        tokio::spawn(async move {
            reader_self.reader_loop(stdout, generation).await;
        });

        match self.initialize_sequence().await {
            Ok(()) => {
                info!(server = %self.server.name, generation, "MCP server initialized");
                Ok(())
            }
            Err(err) => {
                self.reset().await;
                Err(err)
            }
        }
    }

    async fn initialize_sequence(&self) -> Result<(), HostError> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "title": "Stratus"
            },
            "capabilities": {}
        });
        let init_result = self.send_request("initialize", params).await?;
        if let Some(text) = init_result.get("instructions").and_then(Value::as_str) {
            let mut instructions = self.instructions.lock().await;
            *instructions = Some(text.to_string());
        }
        self.send_notification("notifications/initialized", json!({}))
            .await
    }

    async fn reader_loop(self: Arc<Self>, stdout: ChildStdout, generation: u64) {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(raw)) = lines.next_line().await {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => {
                    if let Err(err) = self.process_inbound_message(value).await {
                        warn!(
                            server = %self.server.name,
                            %err,
                            "failed to process message from MCP server"
                        );
                    }
                }
                Err(source) => {
                    warn!(
                        server = %self.server.name,
                        line = trimmed,
                        %source,
                        "received invalid JSON from MCP server"
                    );
                }
            }
        }

        debug!(server = %self.server.name, "MCP server stdout closed");
        // a restarted process owns the state now
        if self.generation.load(Ordering::SeqCst) == generation {
            self.reset().await;
        }
    }

    async fn process_inbound_message(&self, value: Value) -> Result<(), HostError> {
        match (value.get("id").cloned(), value.get("method").is_some()) {
            (Some(id), true) => self.handle_server_request(id, value).await,
            (Some(id), false) => {
                self.handle_response(id, value).await;
                Ok(())
            }
            (None, true) => {
                self.handle_notification(&value);
                Ok(())
            }
            (None, false) => Ok(()),
        }
    }

    async fn handle_response(&self, id: Value, value: Value) {
        let Some(key) = response_key(&id) else {
            return;
        };

        let responder = {
            let mut pending = self.pending.lock().await;
            pending.remove(&key)
        };

        let Some(sender) = responder else {
            debug!(
                server = %self.server.name,
                response_id = key,
                "received response for unknown request"
            );
            return;
        };

        let outcome = match value.get("error") {
            Some(error) => {
                let code = error.get("code").and_then(Value::as_i64).unwrap_or(-32000);
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string();
                Err(HostError::Rpc {
                    server: self.server.name.clone(),
                    code,
                    message,
                })
            }
            None => Ok(value.get("result").cloned().unwrap_or(Value::Null)),
        };
        let _ = sender.send(outcome);
    }

    async fn handle_server_request(&self, id: Value, value: Value) -> Result<(), HostError> {
        let method = value
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if method == "ping" {
            return self.send_response(id, json!({})).await;
        }

        warn!(
            server = %self.server.name,
            method,
            "server sent unsupported request"
        );
        let error = json!({
            "code": -32601,
            "message": format!("client does not implement method '{method}'"),
        });
        self.send_error(id, error).await
    }

    fn handle_notification(&self, value: &Value) {
        let Some(method) = value.get("method").and_then(Value::as_str) else {
            return;
        };
        if method == "notifications/tools/list_changed" {
            warn!(
                server = %self.server.name,
                "tool list changed mid-session; the catalog stays as fetched"
            );
        } else {
            debug!(
                server = %self.server.name,
                method,
                "received notification from server"
            );
        }
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value, HostError> {
        let id = self.next_id();
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            pending.insert(id.clone(), tx);
        }

        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        if let Err(err) = self.write_message(&payload).await {
            self.pending.lock().await.remove(&id);
            return Err(err);
        }

        match timeout(self.server.request_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(HostError::Cancelled {
                server: self.server.name.clone(),
            }),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                warn!(server = %self.server.name, method, "MCP request timed out");
                Err(HostError::Timeout {
                    server: self.server.name.clone(),
                    method: method.to_string(),
                })
            }
        }
    }

    async fn send_notification(&self, method: &str, params: Value) -> Result<(), HostError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        });
        self.write_message(&payload).await
    }

    async fn send_response(&self, id: Value, result: Value) -> Result<(), HostError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result
        });
        self.write_message(&payload).await
    }

    async fn send_error(&self, id: Value, error: Value) -> Result<(), HostError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": error
        });
        self.write_message(&payload).await
    }

    async fn write_message(&self, message: &Value) -> Result<(), HostError> {
        let mut encoded =
            serde_json::to_string(message).map_err(|source| HostError::InvalidJson {
                server: self.server.name.clone(),
                source,
            })?;
        encoded.push('\n');

        let mut writer = self.writer.lock().await;
        let stream = writer
            .as_mut()
            .ok_or_else(|| self.transport_error("writer not initialised"))?;
        stream
            .write_all(encoded.as_bytes())
            .await
            .map_err(|source| self.transport_error(source.to_string()))?;
        stream
            .flush()
            .await
            .map_err(|source| self.transport_error(source.to_string()))?;
        Ok(())
    }

    async fn reset(&self) {
        {
            let mut writer = self.writer.lock().await;
            *writer = None;
        }

        let mut state = self.state.lock().await;
        if let Some(mut running) = state.take() {
            if let Err(err) = running.child.kill().await {
                debug!(
                    server = %self.server.name,
                    %err,
                    "failed to kill MCP server process (may have already exited)"
                );
            }
        }
        drop(state);

        self.fail_all_pending().await;
        self.instructions.lock().await.take();
    }

    async fn fail_all_pending(&self) {
        let mut pending = self.pending.lock().await;
        for (_, sender) in pending.drain() {
            let _ = sender.send(Err(HostError::Terminated {
                server: self.server.name.clone(),
            }));
        }
    }

    fn next_id(&self) -> String {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        format!("req-{id}")
    }

    fn transport_error(&self, message: impl Into<String>) -> HostError {
        HostError::Transport {
            server: self.server.name.clone(),
            message: message.into(),
        }
    }
}

fn response_key(id: &Value) -> Option<String> {
    match id {
        Value::String(value) => Some(value.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}

/// Read the `tools` array of a `tools/list` result, skipping nameless entries.
fn parse_tool_listing(result: &Value) -> Vec<RemoteTool> {
    let Some(array) = result.get("tools").and_then(Value::as_array) else {
        return Vec::new();
    };
    array
        .iter()
        .filter_map(|tool| {
            let name = tool.get("name").and_then(Value::as_str)?;
            Some(RemoteTool {
                name: name.to_string(),
                description: tool
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                input_schema: tool.get("inputSchema").cloned(),
            })
        })
        .collect()
}

/// Join the text blocks of a `tools/call` result.
fn extract_text(result: &Value) -> String {
    let Some(blocks) = result.get("content").and_then(Value::as_array) else {
        return String::new();
    };
    blocks
        .iter()
        .filter(|block| {
            block
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| kind.eq_ignore_ascii_case("text"))
        })
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}
