//! Vehicle Type Registry HTTP Server
//!
//! Serves CRUD endpoints for cars, motorcycles and trucks.

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vehicletype_server::api;
use vehicletype_server::config::{LogFormat, ServerConfig};
use vehicletype_server::registry::Registry;

const DEFAULT_LOG_FILTER: &str =
    "vehicletype_server=info,vehicletype_core=info,vehicletype_repository=info,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(config.log_format)?;
    info!("Loaded configuration: {:?}", config);

    // Wire services, repositories and caches
    let registry = Registry::from_config(&config).await?;
    let _event_loggers = registry.spawn_event_loggers();
    info!("Vehicle registry initialized");

    let app = api::create_router(&registry, config.default_page_size);

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Cars: http://{}/api/v1/car", addr);
    info!("  Motorcycles: http://{}/api/v1/motorcycle", addr);
    info!("  Trucks: http://{}/api/v1/truck", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
