use super::engine::{EngineConfig, RawEngine};
use super::error::ConfigError;
use super::server::{RawServer, ServerConfig};
use crate::constants::{CONFIG_PATH, DEFAULT_SUBJECT_FIELD, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    engine: RawEngine,
    server: Option<RawServer>,
    subject_field: Option<String>,
    subjects: Option<Vec<String>>,
    system_prompt: Option<String>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration.
///
/// An explicit path must exist. When no path is given the default location is
/// tried and built-in defaults are used if it is absent.
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)
            } else {
                info!(
                    path = %default_path.display(),
                    "No configuration file found, using built-in defaults"
                );
                Ok(super::AppConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<super::AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content)
}

pub(super) fn parse_config(content: &str) -> Result<super::AppConfig, ConfigError> {
    let parsed: RawConfig =
        toml::from_str(content).map_err(|source| ConfigError::Parse { source })?;
    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<super::AppConfig, ConfigError> {
    let defaults = super::AppConfig::default();

    let engine = EngineConfig::try_from(parsed.engine)?;

    let server = match parsed.server {
        Some(raw) => {
            if raw.command.trim().is_empty() {
                return Err(ConfigError::MissingServerCommand {
                    server: raw.name.clone(),
                });
            }
            ServerConfig::from(raw)
        }
        None => defaults.server,
    };

    let subject_field = match parsed.subject_field {
        Some(field) if field.trim().is_empty() => return Err(ConfigError::EmptySubjectField),
        Some(field) => field.trim().to_string(),
        None => DEFAULT_SUBJECT_FIELD.to_string(),
    };

    let subjects = parsed
        .subjects
        .map(|list| {
            list.into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or(defaults.subjects);

    Ok(super::AppConfig {
        engine,
        server,
        subject_field,
        subjects,
        system_prompt: parsed.system_prompt.filter(|p| !p.trim().is_empty()),
    })
}
