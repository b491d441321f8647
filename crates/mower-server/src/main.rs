//! Mock backend for the robotic mower app.
//!
//! Serves the status API on all interfaces and moves the simulated mower
//! along its mowing pattern in the background. All state lives in memory
//! and is lost on restart.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `mower-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Create the simulator and spawn the position ticker
//! 4. Serve HTTP until `Ctrl-C`
//! 5. Stop the ticker

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use mower_api::{AppState, ServerConfig};
use mower_core::{MowerConfig, Simulator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerAppError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "mower-config.yaml";

/// Application entry point for the mower server.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, loaded_from_file) = load_config(&config_path)?;

    // Logging comes after config so the configured level can be the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("mower-server starting");
    if loaded_from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    let simulator = Simulator::new(config.simulation.clone()).into_shared();
    let ticker = mower_core::spawn_ticker(
        Arc::clone(&simulator),
        Duration::from_millis(config.simulation.tick_interval_ms),
    );

    let server_config = ServerConfig::from(&config.server);
    let state = Arc::new(AppState::new(simulator));
    let result = mower_api::start_server(&server_config, state, shutdown_signal()).await;

    ticker.abort();
    result.map_err(ServerAppError::from)?;

    info!("mower-server shutdown complete");
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Returns the config and whether it came from the file.
fn load_config(path: &Path) -> Result<(MowerConfig, bool), ServerAppError> {
    if path.exists() {
        Ok((MowerConfig::from_file(path)?, true))
    } else {
        Ok((MowerConfig::default(), false))
    }
}

/// Resolve when the process receives `Ctrl-C`.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
