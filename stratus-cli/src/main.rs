mod cli;
mod demo;
mod error;
mod models;
mod session;
mod stdio;

use clap::Parser;
use cli::{Cli, RunMode};
use error::CliError;
use std::io::IsTerminal;
use std::process::ExitCode;
use stratus_core::config::AppConfig;
use tokio::fs;
use tokio::io::{self, AsyncReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.mode.default_log_filter());
    debug!(mode = ?cli.mode, config = ?cli.config, model = ?cli.model, "CLI arguments parsed");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "stratus exited with an error");
            eprintln!("Error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load(cli.config.as_deref())?.with_model(cli.model.clone());
    info!(
        provider = config.engine.kind.as_str(),
        model = %config.engine.resolved_model(),
        "Configuration loaded"
    );

    let mut stdout = io::stdout();
    if cli.mode == RunMode::Models {
        models::check_models(&config.engine, &mut stdout).await?;
        return Ok(());
    }

    let question = match cli.mode {
        RunMode::Ask => Some(load_prompt(&cli).await?),
        _ => None,
    };

    let assistant = session::connect(&config).await?;
    let result = match (cli.mode, question) {
        (RunMode::Ask, Some(question)) => match assistant.ask(&question).await {
            Ok(answer) => stdio::write_text(&mut stdout, &format!("{answer}\n")).await,
            Err(err) => Err(err.into()),
        },
        (RunMode::Demo, _) => demo::run_demo(&assistant, &mut stdout).await,
        _ => stdio::run_chat(&assistant, BufReader::new(io::stdin()), &mut stdout).await,
    };

    assistant.shutdown().await;
    info!("Session closed");
    result
}

fn init_tracing(default_filter: &str) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

async fn load_prompt(cli: &Cli) -> Result<String, CliError> {
    if let Some(path) = &cli.prompt_file {
        info!(path = %path.display(), "Loading prompt from file");
        let content = fs::read_to_string(path).await?;
        return non_empty(content);
    }

    if !cli.prompt.is_empty() {
        return non_empty(cli.prompt.join(" "));
    }

    if !std::io::stdin().is_terminal() {
        info!("Reading prompt from standard input");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).await?;
        return non_empty(buffer);
    }

    warn!("Prompt not provided via arguments, file, or stdin");
    Err(CliError::MissingPrompt)
}

fn non_empty(prompt: String) -> Result<String, CliError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(CliError::MissingPrompt);
    }
    Ok(trimmed.to_string())
}
