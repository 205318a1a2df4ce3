//! washsense - Fuzzy Wash-Cycle Decision Service
//!
//! Serves the decision API and the embedded dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Run with built-in defaults
//! cargo run --release
//!
//! # Run with a machine config file
//! WASHSENSE_CONFIG=./washsense.toml cargo run --release
//!
//! # Override the bind address
//! cargo run --release -- --addr 127.0.0.1:9090
//! ```
//!
//! # Environment Variables
//!
//! - `WASHSENSE_CONFIG`: Path to the machine TOML config
//! - `WASHSENSE_CORS_ORIGINS`: Extra allowed CORS origins (dev only)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use washsense::api::{create_app, ControllerState};
use washsense::auth::StaticCredentials;
use washsense::config::{self, MachineConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "washsense")]
#[command(about = "Fuzzy wash-cycle decision service")]
#[command(version)]
struct CliArgs {
    /// Override the server bind address (default from config: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to the machine TOML config (overrides the search order)
    #[arg(long, env = "WASHSENSE_CONFIG")]
    config: Option<std::path::PathBuf>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    // Load machine configuration
    let machine_config = match &args.config {
        Some(path) => MachineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MachineConfig::load(),
    };
    info!(
        "Machine: {} ({}) | Output singletons: {:.0}/{:.0}/{:.0} RPM",
        machine_config.machine.name,
        machine_config.machine.id,
        machine_config.output.slow_rpm,
        machine_config.output.medium_rpm,
        machine_config.output.fast_rpm,
    );

    let server_addr = args
        .addr
        .unwrap_or_else(|| machine_config.server.addr.clone());
    let verifier = Arc::new(StaticCredentials::from_config(&machine_config.auth));
    let machine_id = machine_config.machine.id.clone();
    config::init(machine_config);

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  washsense - Fuzzy Wash-Cycle Decision Service");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let state = ControllerState::new(verifier, &machine_id);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;

    info!("HTTP server listening on {}", server_addr);
    info!("Dashboard available at: http://{}", server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Graceful shutdown complete");
        })
        .await
        .context("HTTP server error")?;

    info!("washsense shutdown complete");
    Ok(())
}
