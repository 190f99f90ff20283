//! Engine factory - creates clients from config

use super::clients::{AnthropicClient, OpenAIClient};
use super::traits::ReasoningEngine;
use crate::config::{EngineConfig, EngineKind};
use std::env;
use tracing::warn;

/// Resolve API key from the environment variable named in the config
pub fn resolve_api_key(provider: &str, spec: Option<&str>) -> Option<String> {
    let raw = spec.map(str::trim)?;
    if raw.is_empty() {
        return None;
    }
    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating reasoning engines from engine config.
pub struct EngineFactory;

impl EngineFactory {
    pub fn create(config: &EngineConfig) -> Box<dyn ReasoningEngine> {
        match config.kind {
            EngineKind::Anthropic => Box::new(AnthropicClient::from_config(config)),
            EngineKind::OpenAi => Box::new(OpenAIClient::from_config(config)),
        }
    }
}
