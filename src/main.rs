//! Notification hub server entry point.
//!
//! Starts the Axum HTTP server with the publish, event-stream, and
//! health endpoints, plus the hub control loop behind them.

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pulse_hub::api;
use pulse_hub::app_state::AppState;
use pulse_hub::config::HubConfig;
use pulse_hub::hub::Hub;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HubConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting notification hub");

    let hub = Hub::spawn();
    let app_state = AppState::new(hub, &config);

    let app = api::hub_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
