//! TradeBridge - Main Entry Point
//!
//! Serves the trade queue over HTTP on a loopback address until Ctrl-C.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use trade_bridge::config::loader::load_with_dotenv;
use trade_bridge::server;
use trade_bridge::BridgeService;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,

    /// Interface to bind, overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_with_dotenv(Some(args.config.as_str()))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = args.log_level {
        config.settings.log_level = level;
    }
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.settings.log_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting TradeBridge");
    info!("Configuration file: {}", args.config);

    let service = Arc::new(BridgeService::from_config(&config));
    info!(
        capacity = config.queue.capacity,
        lot_multiplier = %service.multiplier_description(),
        "Bridge initialized"
    );

    let listener = server::bind(&config.server).await?;
    server::serve(listener, Arc::clone(&service), server::shutdown_signal()).await?;

    let hedge = service.hedge_state();
    let stats = service.queue_stats();
    info!(
        net_position = hedge.net_position,
        target_hedge_size = %hedge.target_hedge_size,
        accepted = stats.accepted,
        rejected = stats.rejected,
        dequeued = stats.dequeued,
        "Final bridge state"
    );
    if stats.depth > 0 {
        warn!(pending = stats.depth, "Shutting down with undelivered trades");
    }

    Ok(())
}
