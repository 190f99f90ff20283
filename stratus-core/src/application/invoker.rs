//! Tool invoker
//!
//! Dispatches a single named call to the tool host. Faults never escape as
//! host errors: they are folded into [`ToolError`], whose `Display` text is
//! exactly what gets written back into the conversation.

use crate::application::tooling::{HostError, ToolHost};
use crate::types::{ToolArguments, ToolCatalog, arguments_to_json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool {0} not found")]
    UnknownTool(String),
    #[error("Error executing tool: {message}")]
    ExecutionFailed { tool: String, message: String },
}

impl ToolError {
    fn execution(tool: &str, source: HostError) -> Self {
        ToolError::ExecutionFailed {
            tool: tool.to_string(),
            message: source.to_string(),
        }
    }
}

/// Calls catalog tools on behalf of the orchestration loop.
#[derive(Clone)]
pub struct ToolInvoker {
    catalog: Arc<ToolCatalog>,
    host: Arc<dyn ToolHost>,
}

impl ToolInvoker {
    pub fn new(catalog: Arc<ToolCatalog>, host: Arc<dyn ToolHost>) -> Self {
        Self { catalog, host }
    }

    /// Run one tool and return its text verbatim.
    ///
    /// Names outside the catalog fail without contacting the host.
    pub async fn invoke(&self, name: &str, arguments: &ToolArguments) -> Result<String, ToolError> {
        if !self.catalog.contains(name) {
            warn!(tool = name, "Engine requested a tool outside the catalog");
            return Err(ToolError::UnknownTool(name.to_string()));
        }

        debug!(tool = name, arguments = ?arguments, "Invoking tool");
        match self.host.call_tool(name, arguments_to_json(arguments)).await {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(tool = name, %err, "Tool execution failed");
                Err(ToolError::execution(name, err))
            }
        }
    }
}
