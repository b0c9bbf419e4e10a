//! chipcheck-server - HTTP service for chip sheet diagnostics
//!
//! Loads sheets of chip test records and serves the derived reports
//! (summary, error files, samples to check, user/device counts, ID
//! errors, combined error summary) as plain text.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chipcheck_common::config::load_config;
use chipcheck_common::{Session, Sheet, Threshold};
use chipcheck_server::logging::init_tracing;
use chipcheck_server::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for chipcheck-server
#[derive(Parser, Debug)]
#[command(name = "chipcheck-server")]
#[command(about = "Chip test sheet diagnostics service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "CHIPCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "CHIPCHECK_PORT")]
    port: Option<u16>,

    /// Minimum group size / name frequency (overrides config)
    #[arg(short, long, env = "CHIPCHECK_THRESHOLD")]
    threshold: Option<usize>,

    /// JSON sheet to load at startup (overrides config)
    #[arg(short, long, env = "CHIPCHECK_DATASET")]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing first so config fallbacks are logged
    let log = init_tracing();

    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    log.apply_level(&config.logging.level);

    // Build identification before any slow startup work
    info!(
        "Starting chipcheck-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let threshold = match args.threshold {
        Some(value) => Threshold::new(value).context("Invalid --threshold")?,
        None => config.threshold,
    };
    let port = args.port.unwrap_or(config.port);
    info!("Threshold: {}", threshold);

    let session = Session::new(threshold);

    if let Some(path) = args.dataset.or(config.dataset) {
        match Sheet::from_json_file(&path).and_then(|sheet| session.load_dataset(&sheet)) {
            Ok(dataset) => info!("✓ Preloaded {} records from {}", dataset.len(), path.display()),
            Err(e) => warn!("Could not preload {}: {} (starting without data)", path.display(), e),
        }
    }

    let app = build_router(AppState::new(session));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("chipcheck-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
