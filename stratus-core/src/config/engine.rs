//! # Engine Configuration
//!
//! Selects the reasoning engine backend and the model it runs.
//!
//! | Provider | Wire format | API key |
//! |----------|-------------|---------|
//! | `anthropic` | Messages API with `tool_use` blocks | `x-api-key` header |
//! | `openai` | Chat completions with `tool_calls` | Bearer token, optional |

use super::error::ConfigError;
use crate::constants::{
    DEFAULT_ANTHROPIC_ENDPOINT, DEFAULT_API_KEY_ENV, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_OPENAI_ENDPOINT, MODEL_ENV_VAR,
};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Anthropic,
    OpenAi,
}

impl EngineKind {
    /// Parse a provider type string (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::config::EngineKind;
    ///
    /// assert_eq!(EngineKind::parse("Claude"), Some(EngineKind::Anthropic));
    /// assert_eq!(EngineKind::parse("ollama"), Some(EngineKind::OpenAi));
    /// assert_eq!(EngineKind::parse("gemini"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Some(EngineKind::Anthropic),
            "openai" | "openai-compatible" | "ollama" => Some(EngineKind::OpenAi),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Anthropic => "anthropic",
            EngineKind::OpenAi => "openai",
        }
    }

    fn default_endpoint(self) -> &'static str {
        match self {
            EngineKind::Anthropic => DEFAULT_ANTHROPIC_ENDPOINT,
            EngineKind::OpenAi => DEFAULT_OPENAI_ENDPOINT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub kind: EngineKind,
    /// Explicit model selection; `None` defers to [`resolve_model`].
    pub model: Option<String>,
    pub endpoint: String,
    /// Name of the environment variable that holds the API key
    pub api_key_env: Option<String>,
    pub api_path: Option<String>,
    pub max_tokens: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::Anthropic,
            model: None,
            endpoint: DEFAULT_ANTHROPIC_ENDPOINT.to_string(),
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            api_path: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl EngineConfig {
    /// The model this engine will run, after environment fallback.
    pub fn resolved_model(&self) -> String {
        resolve_model(self.model.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(super) struct RawEngine {
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_path: Option<String>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

impl TryFrom<RawEngine> for EngineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawEngine) -> Result<Self, Self::Error> {
        let kind = match raw.provider {
            Some(provider) => EngineKind::parse(&provider)
                .ok_or(ConfigError::UnknownProvider { provider })?,
            None => EngineKind::Anthropic,
        };
        let max_tokens = raw.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }
        let api_key_env = match raw.api_key {
            Some(name) if name.trim().is_empty() => None,
            Some(name) => Some(name.trim().to_string()),
            None if kind == EngineKind::Anthropic => Some(DEFAULT_API_KEY_ENV.to_string()),
            None => None,
        };

        Ok(Self {
            kind,
            model: raw.model.filter(|model| !model.trim().is_empty()),
            endpoint: raw
                .endpoint
                .unwrap_or_else(|| kind.default_endpoint().to_string()),
            api_key_env,
            api_path: raw.api_path,
            max_tokens,
        })
    }
}

/// Pick the model: explicit selection, then `CLAUDE_MODEL`, then the default.
pub fn resolve_model(explicit: Option<&str>) -> String {
    if let Some(model) = explicit.map(str::trim).filter(|model| !model.is_empty()) {
        return model.to_string();
    }
    match env::var(MODEL_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_MODEL.to_string(),
    }
}
