//! DTOs for the hub's publish endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Notification;
use crate::domain::notification::DEFAULT_KIND;
use crate::error::ServiceError;

/// Body of `POST /notify`.
///
/// Only `content` is required; everything else is defaulted on the way
/// into a [`Notification`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NotifyRequest {
    /// Event identifier; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Message content. Required, non-empty.
    #[serde(default)]
    pub content: String,
    /// Optional originating user.
    #[serde(default)]
    pub user: Option<String>,
    /// Event creation time; stamped with the current time when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Event category tag; defaults to `"message"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl NotifyRequest {
    /// Validates the request and fills in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidRequest`] when `content` is empty.
    pub fn into_notification(self) -> Result<Notification, ServiceError> {
        if self.content.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "content is required".to_string(),
            ));
        }
        Ok(Notification {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            content: self.content,
            user: self.user.filter(|user| !user.is_empty()),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            kind: self
                .kind
                .filter(|kind| !kind.is_empty())
                .unwrap_or_else(|| DEFAULT_KIND.to_string()),
        })
    }
}

/// Body returned by `POST /notify`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotifyResponse {
    /// Always `"sent"`.
    pub status: String,
    /// Identifier of the broadcast event.
    pub id: String,
}
