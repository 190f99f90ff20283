//! Application constants
//!
//! Single source of truth for paths, defaults, and fixed protocol text.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/stratus.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Environment variable consulted when no model is selected explicitly
pub const MODEL_ENV_VAR: &str = "CLAUDE_MODEL";

/// Model used when neither configuration nor environment selects one
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Environment variable holding the Anthropic API key
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub const DEFAULT_ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Schema property that identifies the subject a tool answers about
pub const DEFAULT_SUBJECT_FIELD: &str = "city";

/// Subjects advertised in the system turn when the config names none
pub const DEFAULT_SUBJECTS: [&str; 5] = ["New York", "London", "Tokyo", "Paris", "Sydney"];

/// Hard cap on engine invocations per question. Not configurable.
pub const MAX_ROUNDS: usize = 10;

/// Reply returned to the caller when the round cap is hit
pub const ROUND_LIMIT_MESSAGE: &str = "Sorry, I couldn't process your request. Please try again.";

/// MCP protocol revision announced during `initialize`
pub const PROTOCOL_VERSION: &str = "2025-06-18";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
