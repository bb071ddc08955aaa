//! ircserv - a single-threaded, readiness-driven IRC server.
//!
//! Usage: `ircserv <port> <password> [config.toml]`

mod config;
mod error;
mod handlers;
mod network;
mod state;
mod telemetry;

use crate::config::Config;
use crate::network::{Gateway, MioTransport};
use crate::state::{Matrix, ServerInfo};
use anyhow::Context as _;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: ircserv <port> <password> [config.toml]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(port), Some(password)) = (args.next(), args.next()) else {
        anyhow::bail!(USAGE);
    };
    let port: u16 = port
        .parse()
        .with_context(|| format!("invalid port {port:?}; {USAGE}"))?;

    // Load configuration
    let config = match args.next() {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    }
    .with_overrides(port, password);
    config.validate()?;

    info!(
        server = %config.server.name,
        version = %config.server.version,
        "Starting ircserv"
    );

    let matrix = Matrix::new(
        ServerInfo {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            created: chrono::Utc::now(),
            password: config.server.password.clone().unwrap_or_default(),
        },
        config.limits.max_output_buffer,
    );

    let transport = MioTransport::bind(config.listen.address, config.limits.max_events)
        .with_context(|| format!("failed to bind {}", config.listen.address))?;
    info!(address = %transport.local_addr()?, "Listener bound");

    // Cancel on SIGINT/SIGTERM and wake the poller so the gateway notices.
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        let waker = transport.waker();
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("Shutdown signal received");
            shutdown.cancel();
            if let Err(e) = waker.wake() {
                error!(error = %e, "Failed to wake gateway");
            }
        });
    }

    let mut gateway = Gateway::new(transport, matrix, &config);
    tokio::task::spawn_blocking(move || gateway.run(&shutdown)).await??;

    info!("Server stopped");
    Ok(())
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
                return;
            }
            Err(e) => warn!(error = %e, "SIGTERM handler unavailable"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
    }
}
