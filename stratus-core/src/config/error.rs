use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown engine provider '{provider}' (expected 'anthropic' or 'openai')")]
    UnknownProvider { provider: String },

    #[error("server '{server}' is missing required field 'command'")]
    MissingServerCommand { server: String },

    #[error("'subject_field' must not be empty")]
    EmptySubjectField,

    #[error("'max_tokens' must be greater than zero")]
    InvalidMaxTokens,
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NotFound { path } => {
                format!("Config file {} does not exist.", path.display())
            }
            ConfigError::Parse { .. } => "Config file is not valid TOML.".to_string(),
            other => other.to_string(),
        }
    }
}
