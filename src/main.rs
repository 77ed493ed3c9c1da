//! Philosopher quote card service.
//!
//! # Architecture Overview
//!
//! ```text
//!   GET /api/...        ┌──────────┐   ┌──────────────┐   GET quotes, philosopher
//!  ────────────────────▶│   http   │──▶│   quoting    │──────────────────────────▶ Philosophy API
//!                       │  server  │   │ fetch+select │
//!                       └────┬─────┘   └──────┬───────┘
//!                            │                ▼
//!   image/svg+xml            │         ┌──────────────┐
//!   image/png         ◀──────┴─────────│    render    │
//!                                      │ wrap+compose │
//!                                      └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use quote_card::config::{load_config, ServiceConfig};
use quote_card::observability::{logging, metrics};
use quote_card::{HttpServer, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "quote-card")]
#[command(about = "Serve philosopher quotes as SVG or PNG cards", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "quote-card starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        quotes_url = %config.upstream.quotes_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
