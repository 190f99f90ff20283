//! Engine traits

use super::types::ModelError;
use crate::types::{AssistantMessage, ToolCatalog, Turn};
use async_trait::async_trait;

/// A language model that either answers or asks for tool calls.
///
/// Given the conversation so far and the tools it may call, the engine
/// returns exactly one assistant message per invocation.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Identifier used in logs (provider id)
    fn id(&self) -> &str;

    /// Model name the engine runs
    fn model(&self) -> &str;

    async fn complete(
        &self,
        turns: &[Turn],
        catalog: &ToolCatalog,
    ) -> Result<AssistantMessage, ModelError>;
}

#[async_trait]
impl ReasoningEngine for Box<dyn ReasoningEngine> {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn model(&self) -> &str {
        self.as_ref().model()
    }

    async fn complete(
        &self,
        turns: &[Turn],
        catalog: &ToolCatalog,
    ) -> Result<AssistantMessage, ModelError> {
        self.as_ref().complete(turns, catalog).await
    }
}
