use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// How to launch the MCP server that hosts the tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub command: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub workdir: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "weather".to_string(),
            command: PathBuf::from("stratus-weather"),
            args: Vec::new(),
            env: HashMap::new(),
            workdir: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawServer {
    #[serde(default = "default_server_name")]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    env: HashMap<String, String>,
    workdir: Option<String>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

fn default_server_name() -> String {
    "weather".to_string()
}

impl From<RawServer> for ServerConfig {
    fn from(raw: RawServer) -> Self {
        let expand = |s: &str| -> String {
            shellexpand::full(s)
                .map(|cow| cow.into_owned())
                .unwrap_or_else(|_| s.to_string())
        };

        let command = PathBuf::from(expand(&raw.command));
        let workdir = raw.workdir.map(|d| PathBuf::from(expand(&d)));
        let args = raw.args.into_iter().map(|arg| expand(&arg)).collect();
        let env = raw
            .env
            .into_iter()
            .map(|(key, value)| {
                let value = expand(&value);
                (key, value)
            })
            .collect();
        let timeout = raw
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            name: raw.name,
            command,
            args,
            env,
            workdir,
            request_timeout: Duration::from_secs(timeout),
        }
    }
}
