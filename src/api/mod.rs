//! REST API layer: route handlers, DTOs, and per-service router
//! composition.

pub mod dto;
pub mod handlers;

use axum::Router;
use axum::routing::{get, post};

use crate::app_state::AppState;
use crate::sse::handler::events_handler;

use handlers::calc::{CalcState, calc_handler};
use handlers::math::{mul_handler, sum_handler};
use handlers::message::{MessageState, send_message_handler};
use handlers::notify::notify_handler;
use handlers::system::health_handler;

/// Routes of the notification hub service.
pub fn hub_router() -> Router<AppState> {
    Router::new()
        .route("/notify", post(notify_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
}

/// Routes of the sum worker.
pub fn sum_router() -> Router {
    Router::new()
        .route("/", get(sum_handler))
        .route("/health", get(health_handler))
}

/// Routes of the mul worker.
pub fn mul_router() -> Router {
    Router::new()
        .route("/", get(mul_handler))
        .route("/health", get(health_handler))
}

/// Routes of the calc aggregator.
pub fn calc_router() -> Router<CalcState> {
    Router::new()
        .route("/", get(calc_handler))
        .route("/health", get(health_handler))
}

/// Routes of the message-submission service.
pub fn message_router() -> Router<MessageState> {
    Router::new()
        .route("/messages", post(send_message_handler))
        .route("/health", get(health_handler))
}
