//! Main Entrypoint for the Clipview Viewer
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Spawning the stdin control surface.
//! 4. Running the live session connection until it ends or Ctrl+C arrives.

use anyhow::Context;
use clipview_viewer::{config::Config, connection, controls, render::LogSurface};
use tokio::sync::mpsc;
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the client.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!(url = %config.server_url, "Configuration loaded. Starting live session client...");

    let (action_tx, action_rx) = mpsc::channel(16);
    tokio::spawn(controls::stdin_controls(action_tx));

    let surface = LogSurface::new(config.frame_out.clone());
    tokio::select! {
        result = connection::run(&config, surface, action_rx) => result?,
        _ = shutdown_signal() => {}
    }

    info!("Live session client stopped.");
    Ok(())
}
