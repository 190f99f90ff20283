use stratus_core::agent::AgentError;
use stratus_core::catalog::CatalogError;
use stratus_core::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("a question is required via arguments, --prompt-file, or stdin")]
    MissingPrompt,
}

impl CliError {
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(err) => err.user_message(),
            CliError::Catalog(err) => err.user_message(),
            CliError::Agent(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
