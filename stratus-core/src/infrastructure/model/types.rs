//! Engine error type

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' returned HTTP {status}: {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn status(provider: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status reported by the provider, if the request got that far
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ModelError::Status { status, .. } => Some(*status),
            ModelError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ModelError::MissingApiKey { provider } => {
                format!("Provider '{provider}' needs an API key. Set it in the environment or config/.env.")
            }
            ModelError::Network { provider, source } => {
                if source.is_connect() {
                    format!("Could not connect to model provider '{provider}'.")
                } else if source.is_timeout() {
                    format!("Request to '{provider}' timed out.")
                } else {
                    format!("Network error talking to '{provider}'.")
                }
            }
            ModelError::Status {
                provider, status, ..
            } => match *status {
                401 => format!("Provider '{provider}' rejected the API key."),
                403 => format!("The API key has no access to this model on '{provider}'."),
                404 => format!("Model not found on '{provider}'."),
                429 => format!("Provider '{provider}' is rate limiting requests."),
                500..=599 => format!("Provider '{provider}' is currently unavailable."),
                other => format!("Request to '{provider}' failed with HTTP {other}."),
            },
            ModelError::InvalidResponse { provider, .. } => {
                format!("Response from '{provider}' could not be understood.")
            }
        }
    }
}
