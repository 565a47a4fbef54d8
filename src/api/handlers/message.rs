//! Message-submission endpoint.
//!
//! Accepts a message, answers immediately, and forwards a notification
//! to the hub in a detached task. Forwarding failures are logged and
//! never surfaced to the submitter.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::api::dto::{MessageRequest, MessageResponse};
use crate::config::MessageConfig;
use crate::domain::Notification;
use crate::error::{ErrorResponse, ServiceError};

/// Shared state of the message service.
#[derive(Debug, Clone)]
pub struct MessageState {
    /// Outbound HTTP client, shared across requests.
    pub http: reqwest::Client,
    /// Base URL of the notification hub.
    pub notification_service_url: String,
}

impl MessageState {
    /// Builds the state from configuration.
    #[must_use]
    pub fn from_config(config: &MessageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            notification_service_url: config.notification_service_url.clone(),
        }
    }
}

/// `POST /messages` — Submit a message.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] when `content` is empty.
#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messages",
    summary = "Submit a message",
    description = "Validates the message, responds immediately, and forwards a notification to the hub fire-and-forget.",
    request_body = MessageRequest,
    responses(
        (status = 201, description = "Message accepted", body = MessageResponse),
        (status = 400, description = "Missing content", body = ErrorResponse),
    )
)]
pub async fn send_message_handler(
    State(state): State<MessageState>,
    Json(request): Json<MessageRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    if request.content.is_empty() {
        return Err(ServiceError::InvalidRequest(
            "content is required".to_string(),
        ));
    }

    let notification = Notification::new(request.content, request.user);
    let response = MessageResponse {
        id: notification.id.clone(),
        content: notification.content.clone(),
        user: notification.user.clone(),
        timestamp: notification.timestamp,
        status: "sent".to_string(),
    };

    tokio::spawn(forward_notification(state, notification));

    Ok((StatusCode::CREATED, Json(response)))
}

/// Fire-and-forget forward to the hub's publish endpoint.
async fn forward_notification(state: MessageState, notification: Notification) {
    let url = format!("{}/notify", state.notification_service_url);
    match state.http.post(&url).json(&notification).send().await {
        Ok(response) if !response.status().is_success() => {
            tracing::warn!(status = %response.status(), "notification service rejected forward");
        }
        Ok(_) => {}
        Err(error) => {
            tracing::warn!(%error, "failed to forward notification");
        }
    }
}
