//! HTTP transport for the bridge

pub mod response;
pub mod routes;

use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::common::errors::Result;
use crate::config::types::ServerConfig;

pub use routes::{router, SharedService};

/// Bind the listener described by `config`
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    Ok(listener)
}

/// Serve the bridge on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, service: SharedService, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "Bridge server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Bridge server stopped");
    Ok(())
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
