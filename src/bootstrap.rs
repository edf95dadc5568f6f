use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::ProxyConfig;
use crate::service::ExplorerService;

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = ProxyConfig::from_env()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        retry_attempts = config.retry.max_attempts(),
        holders_cache_capacity = config.holders_cache_capacity,
        abi_cache_capacity = config.abi_cache_capacity,
        "Starting scanproxy"
    );

    let service = Arc::new(ExplorerService::from_config(&config)?);
    let listener = TcpListener::bind(config.listen_addr).await?;

    serve_api(listener, service).await?;

    Ok(())
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, service: AppState) -> anyhow::Result<()> {
    let app = api::router(service);

    let addr = listener.local_addr()?;

    tracing::info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
