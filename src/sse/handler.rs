//! Axum handler for the long-lived event stream.

use std::convert::Infallible;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::sse::{Event as SseEvent, Sse};
use futures_util::stream;
use serde::Deserialize;
use tokio::sync::mpsc;
use utoipa::IntoParams;

use crate::app_state::AppState;
use crate::domain::SubscriberId;
use crate::hub::subscriber_pair;

use super::delivery::run_delivery;
use super::sink::SseSink;

/// Frames buffered between the delivery loop and the response body.
const FRAME_BUFFER: usize = 16;

/// Query parameters for `GET /events`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct EventStreamParams {
    /// Caller-supplied subscriber identity; generated when absent.
    pub client_id: Option<String>,
}

/// `GET /events` — Subscribe to the notification stream.
///
/// Registers a subscriber, starts its delivery loop, and returns a
/// never-ending SSE response. The subscriber is unregistered exactly once
/// when the loop ends, whether through client disconnect, a sink failure,
/// or the hub closing it.
#[utoipa::path(
    get,
    path = "/events",
    tag = "Notifications",
    summary = "Server-Sent-Events notification stream",
    description = "Long-lived stream of notification frames and keep-alive comments.",
    params(EventStreamParams),
    responses(
        (status = 200, description = "Event stream established", content_type = "text/event-stream"),
    )
)]
pub async fn events_handler(
    State(state): State<AppState>,
    Query(params): Query<EventStreamParams>,
) -> impl IntoResponse {
    let id = params
        .client_id
        .filter(|id| !id.is_empty())
        .map(SubscriberId::from)
        .unwrap_or_else(SubscriberId::generate);

    let (handle, subscriber) = subscriber_pair(id, state.inbox_capacity);
    state.hub.register(handle);

    let (sink, body) = SseSink::channel(FRAME_BUFFER);
    let hub = state.hub.clone();
    let keep_alive = state.keep_alive;

    tokio::spawn(async move {
        let id = subscriber.id().clone();
        if let Err(error) = run_delivery(subscriber, sink, keep_alive).await {
            tracing::debug!(subscriber = %id, %error, "event stream closed");
        }
        hub.unregister(id);
    });

    (
        [(header::CACHE_CONTROL, "no-cache")],
        Sse::new(frame_stream(body)),
    )
}

/// Wraps the frame channel as the SSE body stream.
fn frame_stream(
    body: mpsc::Receiver<SseEvent>,
) -> impl futures_util::Stream<Item = Result<SseEvent, Infallible>> {
    stream::unfold(body, |mut body| async move {
        body.recv().await.map(|frame| (Ok(frame), body))
    })
}
