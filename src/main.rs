mod actor_framework;
mod api;
mod app_system;
mod clients;
mod config;
mod customer_actor;
mod domain;
mod order_actor;
mod schedule_actor;

#[cfg(test)]
mod mock_framework;

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{error, info, Instrument};

use crate::api::AppState;
use crate::app_system::{setup_tracing, OrderSystem, SystemError};
use crate::config::Config;

/// AquaEase water-can order service.
#[derive(Parser, Debug)]
#[command(name = "aquaease", version, about)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config/aquaease.toml")]
    config: PathBuf,

    /// Log filter, overriding `logging.level` (e.g. `debug`, `aquaease=trace`).
    #[arg(long)]
    log_level: Option<String>,

    /// Port to listen on, overriding `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    let args = Args::parse();

    let loaded = Config::from_file(&args.config);
    let level = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    setup_tracing(&level);

    let mut config = loaded.inspect_err(|e| {
        error!(path = %args.config.display(), error = %e, "Failed to load configuration");
    })?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!(
        unit_price = config.pricing.unit_price,
        currency = %config.pricing.currency,
        "Starting AquaEase order service"
    );

    let mut system = OrderSystem::new(&config);
    if config.schedules.enabled {
        system.start_materializer(config.materialize_interval());
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    let state = AppState::new(&system, &config.pricing.currency);

    let served = api::serve(listener, state, shutdown_signal())
        .instrument(tracing::info_span!("http_server"))
        .await;

    system.shutdown().await?;
    served?;

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
