//! # trivia-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the trivia API.
//! Binds to a configurable port (default 8080).

use trivia_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    let state = AppState::with_config(config).map_err(|e| {
        tracing::error!("Catalog initialization failed: {e}");
        e
    })?;

    let app = trivia_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Trivia API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
