//! Main application entry point for the geocluster service.
//!
//! Startup sequence: parse CLI arguments, load and validate the TOML
//! configuration, initialize logging, load the point set, then serve HTTP
//! until a termination signal arrives.

mod cli;
mod config;
mod logging;
mod routes;
mod source;

use std::sync::Arc;
use tokio::signal;
use tracing::info;

use cli::CliArgs;
use config::AppConfig;
use routes::AppState;

/// Resolves on SIGINT or SIGTERM (Ctrl+C on Windows).
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint =
            signal(SignalKind::interrupt()).expect("failed to create SIGINT handler");
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to create SIGTERM handler");

        tokio::select! {
            _ = sigint.recv() => {
                info!("SIGINT received - initiating graceful shutdown");
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received - initiating graceful shutdown");
            }
        }
    }

    #[cfg(windows)]
    {
        signal::ctrl_c().await.expect("failed to create Ctrl+C handler");
        info!("Ctrl+C received - initiating graceful shutdown");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = AppConfig::load_from_file(&args.config_path).await?;
    config.apply_overrides(&args);
    if let Err(e) = config.validate() {
        anyhow::bail!("Configuration validation failed: {e}");
    }

    logging::setup_logging(&config.logging)?;

    info!("Starting geocluster v{} with PID {}", env!("CARGO_PKG_VERSION"), std::process::id());
    info!(
        "Grid: {}x{} | Excluded: ({}, {}) | Source: {}",
        config.map.width,
        config.map.height,
        config.excluded.lat,
        config.excluded.lng,
        config.source.points_file
    );

    let store = source::load_points(config.source.points_file.as_ref()).await?;

    let state = Arc::new(AppState {
        store,
        grid_width: config.map.width,
        grid_height: config.map.height,
        excluded: (config.excluded.lat, config.excluded.lng),
    });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}
