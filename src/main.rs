//! Storefront Edge Service
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                STOREFRONT EDGE               │
//!                         │                                              │
//!   Client Request        │  ┌─────────┐    ┌─────────┐                  │
//!   ──────────────────────┼─▶│  http   │───▶│ routing │                  │
//!                         │  │ server  │    │  table  │                  │
//!                         │  └─────────┘    └────┬────┘                  │
//!                         │          ┌───────────┴───────────┐           │
//!                         │          ▼                       ▼           │
//!                         │  ┌──────────────┐        ┌──────────────┐    │
//!                         │  │    proxy     │        │     cart     │    │
//!                         │  │ pass-through │        │    store     │    │
//!                         │  └──────┬───────┘        └──────────────┘    │
//!                         │         │                                    │
//!                         └─────────┼────────────────────────────────────┘
//!                                   ▼
//!                            Backend service (products, orders)
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use storefront_edge::config::{load_effective_config, watcher::ConfigWatcher};
use storefront_edge::lifecycle::{signals::spawn_signal_listener, Shutdown};
use storefront_edge::observability::{logging, metrics};
use storefront_edge::HttpServer;

#[derive(Parser)]
#[command(name = "storefront-edge", version)]
#[command(about = "Cart and catalog edge service for the storefront", long_about = None)]
struct Args {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long, env = "EDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = load_effective_config(args.config.as_deref())?;
    logging::init(&config.observability);

    if args.check {
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        backend_url = %config.backend.base_url,
        backend_timeout_ms = config.backend.request_timeout_ms,
        admin_enabled = config.admin.enabled,
        "storefront-edge starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // Hot reload is only available when a file was given.
    let (_watcher, config_updates) = match args.config.as_deref() {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path, Some(config.clone()));
            match watcher.run() {
                Ok(handle) => (Some(handle), updates),
                Err(e) => {
                    tracing::warn!(error = %e, "Config watcher unavailable; hot reload disabled");
                    (None, updates)
                }
            }
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
