use super::engine::EngineConfig;
use super::error::ConfigError;
use super::server::ServerConfig;
use crate::constants::{DEFAULT_SUBJECT_FIELD, DEFAULT_SUBJECTS};
use std::path::Path;

/// Application configuration loaded from stratus.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub server: ServerConfig,
    /// Schema property that marks a tool as answering about one subject
    pub subject_field: String,
    /// Subjects named in the system turn
    pub subjects: Vec<String>,
    /// System turn template; `{{subjects}}` is replaced with the subject list
    pub system_prompt: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            server: ServerConfig::default(),
            subject_field: DEFAULT_SUBJECT_FIELD.to_string(),
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
            system_prompt: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content)
    }

    /// Override the model selection, e.g. from a CLI flag
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.engine.model = Some(model);
        }
        self
    }
}
