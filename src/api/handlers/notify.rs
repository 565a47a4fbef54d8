//! Publish endpoint of the notification hub.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::api::dto::{NotifyRequest, NotifyResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ServiceError};

/// `POST /notify` — Broadcast a notification to all subscribers.
///
/// Returns as soon as the event is handed to the hub's control loop;
/// delivery to subscribers is best-effort and never reported back.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] when `content` is empty.
#[utoipa::path(
    post,
    path = "/notify",
    tag = "Notifications",
    summary = "Publish a notification",
    description = "Validates the event body and enqueues it for broadcast to every connected subscriber.",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Notification enqueued", body = NotifyResponse),
        (status = 400, description = "Invalid event body", body = ErrorResponse),
    )
)]
pub async fn notify_handler(
    State(state): State<AppState>,
    Json(request): Json<NotifyRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let notification = request.into_notification()?;
    let id = notification.id.clone();

    state.hub.broadcast(notification);

    Ok((
        StatusCode::OK,
        Json(NotifyResponse {
            status: "sent".to_string(),
            id,
        }),
    ))
}
