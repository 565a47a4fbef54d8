//! Calc aggregator entry point.

use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pulse_hub::api;
use pulse_hub::api::handlers::calc::CalcState;
use pulse_hub::config::CalcConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CalcConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        sum = %config.sum_service_url,
        mul = %config.mul_service_url,
        "starting calc service"
    );

    let state = CalcState::from_config(&config)?;

    let app = api::calc_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(15)))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
