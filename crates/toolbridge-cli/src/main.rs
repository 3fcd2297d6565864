//! Toolbridge: serves an HTTP tool-provider API as a stdio MCP server.

mod logging;
mod signal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use toolbridge_api::RemoteToolClient;
use toolbridge_config::{BridgeConfig, CliOverrides};
use toolbridge_mcp::{ProtocolAdapter, Session, StdioTransport};
use toolbridge_types::ConfigError;

#[derive(Parser)]
#[command(
    name = "toolbridge",
    version,
    about = "Expose an HTTP tool-provider API as a stdio MCP server"
)]
struct Cli {
    /// Base URL of the remote tool API (overrides API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Access token sent with every request (overrides JWT_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Append log lines to this file (overrides LOG_FILE)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match BridgeConfig::load(CliOverrides {
        api_url: cli.api_url,
        token: cli.token,
        log_file: cli.log_file,
    }) {
        Ok(config) => config,
        Err(ConfigError::MissingKey { key }) => {
            eprintln!("ERROR: {key} environment variable is required");
            eprintln!("Usage: set {key} in the MCP client's server env, or pass --token");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    logging::init(config.log_file.as_deref());

    let code = match run(config).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Fatal error: {e:#}");
            eprintln!("Fatal error: {e:#}");
            1
        }
    };

    // Exit here rather than dropping the runtime, which would block on the
    // stdin reader thread.
    std::process::exit(code);
}

async fn run(config: BridgeConfig) -> Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %config.api_url,
        log_file = ?config.log_file,
        "Starting toolbridge"
    );

    let client = RemoteToolClient::new(&config.api_url, &config.token)
        .context("Failed to create remote API client")?;
    let mut session = Session::new(ProtocolAdapter::new(Arc::new(client)));

    let shutdown = CancellationToken::new();
    let _listener = signal::spawn_listener(shutdown.clone())
        .context("Failed to install signal handlers")?;

    session
        .bind(StdioTransport::stdio())
        .context("Failed to bind stdio transport")?;
    tracing::info!("toolbridge started successfully");

    let served = session.serve(&shutdown).await;
    let closed = session.close().await;
    let reason = served.context("Stdio session failed")?;
    closed.context("Failed to close stdio session")?;

    tracing::info!(?reason, "toolbridge shut down");
    Ok(())
}
