//! Taskboard API server.
//!
//! Serves the task REST API with the store and completion provider
//! selected by environment configuration.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use taskboard::server::{build_router, shutdown_signal, AppState};
use taskboard::Config;

#[derive(Parser)]
#[command(name = "taskboard-server")]
#[command(about = "Task board REST API with AI-assisted planning", long_about = None)]
#[command(version)]
struct Args {
    /// Listen port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskboard=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }

    if !config.ai_enabled() {
        warn!("OPENAI_API_KEY is not set - AI routes will answer 503");
    }

    let state = AppState::from_config(&config).context("Failed to initialize application state")?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!(port = config.port, "Taskboard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
