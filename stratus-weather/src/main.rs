use std::process::ExitCode;
use stratus_weather::serve;
use tokio::io::{self, BufReader};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    info!("Starting stratus-weather MCP server on stdio");

    match serve(BufReader::new(io::stdin()), io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "stratus-weather stopped");
            ExitCode::FAILURE
        }
    }
}

// stdout carries the protocol, so logs go to stderr.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
