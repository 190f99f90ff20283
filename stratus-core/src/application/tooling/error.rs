use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to spawn MCP server '{server}': {source}")]
    Spawn {
        server: String,
        #[source]
        source: std::io::Error,
    },
    #[error("MCP server '{server}' transport error: {message}")]
    Transport { server: String, message: String },
    #[error("MCP server '{server}' returned invalid JSON: {source}")]
    InvalidJson {
        server: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("MCP server '{server}' returned JSON-RPC error {code}: {message}")]
    Rpc {
        server: String,
        code: i64,
        message: String,
    },
    #[error("MCP server '{server}' did not answer '{method}' in time")]
    Timeout { server: String, method: String },
    #[error("MCP server '{server}' terminated unexpectedly")]
    Terminated { server: String },
    #[error("MCP server '{server}' request cancelled")]
    Cancelled { server: String },
    #[error("{message}")]
    ToolReported { tool: String, message: String },
}
