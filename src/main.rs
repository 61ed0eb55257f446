// ABOUTME: Entry point for the brewlog binary.
// ABOUTME: Loads .env and CLI overrides, initializes tracing, opens the database, and serves the API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use brewlog_server::{AppState, BrewlogConfig, create_router};
use brewlog_store::Database;
use clap::Parser;

/// Coffee brewing log API server.
#[derive(Debug, Parser)]
#[command(name = "brewlog", version, about)]
struct Cli {
    /// Address to listen on (overrides BREWLOG_BIND).
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// SQLite URL or path (overrides DATABASE_URL).
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment and defaults still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "brewlog=debug,brewlog_server=debug,brewlog_store=debug,tower_http=debug",
                )
            }),
        )
        .init();

    let cli = Cli::parse();

    let mut config = BrewlogConfig::from_env().context("invalid configuration")?;
    if let Some(url) = cli.database_url.as_deref() {
        config = config
            .with_database_url(url)
            .context("invalid --database-url")?;
    }
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;

    let bind = config.bind;
    tracing::info!(
        bind = %bind,
        prefix = %config.api_prefix,
        database = %config.database_path.display(),
        "brewlog starting up"
    );

    let state = Arc::new(AppState::new(config, db));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("brewlog shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
    }
}
