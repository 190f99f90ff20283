use async_trait::async_trait;
use serde_json::Value;

use super::error::HostError;

/// A tool as listed by the host, before schema conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTool {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Option<Value>,
}

/// The external process that owns the tools.
#[async_trait]
pub trait ToolHost: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<RemoteTool>, HostError>;

    /// Call a tool and return its textual result unchanged.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, HostError>;

    /// Free-form guidance the host sent during initialization, if any.
    async fn instructions(&self) -> Option<String> {
        None
    }

    async fn shutdown(&self) {}
}
