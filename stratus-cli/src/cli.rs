use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stratus",
    version,
    about = "Weather assistant that answers through MCP tools"
)]
pub struct Cli {
    /// Path to stratus.toml (defaults to config/stratus.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Model to run; overrides the config file and CLAUDE_MODEL
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long, value_enum, default_value_t = RunMode::Chat)]
    pub mode: RunMode,
    /// Read the question from a file in `ask` mode
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,
    #[arg()]
    pub prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Interactive question loop
    Chat,
    /// Answer one question and exit
    Ask,
    /// Run the canned example questions
    Demo,
    /// Probe which models the API key can use
    Models,
}

impl RunMode {
    /// Log filter used when `RUST_LOG` is unset.
    ///
    /// Chat stays quiet so log lines do not interleave with the conversation.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            RunMode::Chat => "warn",
            RunMode::Ask | RunMode::Demo | RunMode::Models => "info",
        }
    }
}
