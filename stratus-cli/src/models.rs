//! Model availability probe
//!
//! Sends a minimal request to each candidate model and reports which ones the
//! configured key can use.

use crate::error::CliError;
use crate::stdio::write_text;
use std::env;
use stratus_core::config::{EngineConfig, EngineKind};
use stratus_core::constants::MODEL_ENV_VAR;
use stratus_core::model::{EngineFactory, ModelError, ReasoningEngine};
use stratus_core::types::{AssistantMessage, ToolCatalog, Turn};
use tokio::io::AsyncWrite;
use tracing::debug;

pub const CANDIDATE_MODELS: [&str; 5] = [
    "claude-3-5-sonnet-20241022",
    "claude-3-5-sonnet-20240620",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

const PROBE_MAX_TOKENS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    NotFound,
    PermissionDenied,
    Failed(String),
}

impl Availability {
    pub fn classify(result: &Result<AssistantMessage, ModelError>) -> Self {
        match result {
            Ok(_) => Availability::Available,
            Err(err) => match err.http_status() {
                Some(404) => Availability::NotFound,
                Some(403) => Availability::PermissionDenied,
                _ => Availability::Failed(err.to_string().chars().take(50).collect()),
            },
        }
    }

    fn render(&self, model: &str) -> String {
        match self {
            Availability::Available => format!("✓ {model} - AVAILABLE"),
            Availability::NotFound => format!("✗ {model} - NOT FOUND (404)"),
            Availability::PermissionDenied => format!("⚠ {model} - PERMISSION DENIED"),
            Availability::Failed(reason) => format!("? {model} - ERROR: {reason}"),
        }
    }
}

/// Probe every candidate and print a summary. Returns the usable models.
pub async fn check_models<W>(engine: &EngineConfig, output: &mut W) -> Result<Vec<String>, CliError>
where
    W: AsyncWrite + Unpin,
{
    if engine.kind == EngineKind::Anthropic {
        let key_var = engine.api_key_env.as_deref().unwrap_or_default();
        if key_var.is_empty() || env::var(key_var).is_err() {
            write_text(
                output,
                &format!(
                    "Error: {key_var} environment variable not set\n\nSet it in the environment or in config/.env.\n"
                ),
            )
            .await?;
            return Ok(Vec::new());
        }
    }

    write_text(output, "Testing model availability:\n\n").await?;
    let probe = [Turn::User("Hi".to_string())];
    let catalog = ToolCatalog::default();
    let mut available = Vec::new();

    for model in CANDIDATE_MODELS {
        let config = EngineConfig {
            model: Some(model.to_string()),
            max_tokens: PROBE_MAX_TOKENS,
            ..engine.clone()
        };
        let client = EngineFactory::create(&config);
        let result = client.complete(&probe, &catalog).await;
        let availability = Availability::classify(&result);
        debug!(model, ?availability, "Model probed");

        write_text(output, &format!("{}\n", availability.render(model))).await?;
        if availability == Availability::Available {
            available.push(model.to_string());
        }
    }

    write_text(output, &summary(&available)).await?;
    Ok(available)
}

fn summary(available: &[String]) -> String {
    let rule = "=".repeat(60);
    let mut text = format!("\n{rule}\n");
    match available.first() {
        Some(first) => {
            text.push_str(&format!("\nAvailable models ({}):\n", available.len()));
            for model in available {
                text.push_str(&format!("  • {model}\n"));
            }
            text.push_str(&format!(
                "\nTo use a specific model, set {MODEL_ENV_VAR}:\n  {MODEL_ENV_VAR}={first}\n"
            ));
        }
        None => {
            text.push_str("\nNo models available. Please check:\n");
            text.push_str("  1. Your API key is correct\n");
            text.push_str("  2. Your API key has the necessary permissions\n");
            text.push_str("  3. Your account has access to Claude models\n");
        }
    }
    text.push_str(&format!("{rule}\n"));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> Result<AssistantMessage, ModelError> {
        Err(ModelError::Status {
            provider: "anthropic".into(),
            status: code,
            message: "model: claude-3-opus-20240229".into(),
        })
    }

    #[test]
    fn classifies_by_status_code() {
        assert_eq!(
            Availability::classify(&Ok(AssistantMessage::text("Hello"))),
            Availability::Available
        );
        assert_eq!(Availability::classify(&status(404)), Availability::NotFound);
        assert_eq!(
            Availability::classify(&status(403)),
            Availability::PermissionDenied
        );
        assert!(matches!(
            Availability::classify(&status(529)),
            Availability::Failed(reason) if reason.chars().count() <= 50
        ));
    }

    #[test]
    fn summary_suggests_first_available_model() {
        let text = summary(&[
            "claude-3-opus-20240229".to_string(),
            "claude-3-haiku-20240307".to_string(),
        ]);
        assert!(text.contains("Available models (2)"));
        assert!(text.contains("CLAUDE_MODEL=claude-3-opus-20240229"));
    }

    #[test]
    fn summary_without_models_lists_checks() {
        let text = summary(&[]);
        assert!(text.contains("No models available"));
    }

    #[tokio::test]
    async fn missing_key_stops_before_probing() {
        let engine = EngineConfig {
            api_key_env: Some("STRATUS_TEST_UNSET_KEY_VAR".into()),
            ..EngineConfig::default()
        };
        let mut output = Vec::new();

        let available = check_models(&engine, &mut output).await.expect("check");

        assert!(available.is_empty());
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("STRATUS_TEST_UNSET_KEY_VAR environment variable not set"));
    }
}
