use crate::error::CliError;
use std::sync::Arc;
use stratus_core::config::AppConfig;
use stratus_core::model::{EngineFactory, ReasoningEngine};
use stratus_core::tooling::{McpProcess, ToolHost};
use stratus_core::{Assistant, SessionOptions};
use tracing::info;

pub type Session = Assistant<Box<dyn ReasoningEngine>>;

/// Start the tool server, fetch its catalog, and bind it to the configured engine.
pub async fn connect(config: &AppConfig) -> Result<Session, CliError> {
    let engine = EngineFactory::create(&config.engine);
    info!(
        provider = engine.id(),
        model = engine.model(),
        server = config.server.name.as_str(),
        command = %config.server.command.display(),
        "Connecting to tool server"
    );

    let host: Arc<dyn ToolHost> = Arc::new(McpProcess::new(config.server.clone()));
    match Assistant::connect(engine, Arc::clone(&host), SessionOptions::from(config)).await {
        Ok(assistant) => Ok(assistant),
        Err(err) => {
            host.shutdown().await;
            Err(err.into())
        }
    }
}
