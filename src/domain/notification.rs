//! The notification event broadcast through the hub.
//!
//! A [`Notification`] is an immutable value: once built it is cloned into
//! each live subscriber's inbox during a broadcast pass and serialized to
//! JSON on the way out to the client stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default value for [`Notification::kind`] when the publisher omits it.
pub const DEFAULT_KIND: &str = "message";

/// A single broadcast event.
///
/// Serialized as one JSON object per SSE `data:` frame. The `kind` field
/// uses the wire name `type`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    /// Unique event identifier. Callers may supply one; generated
    /// otherwise.
    pub id: String,

    /// Message content. Required, non-empty.
    pub content: String,

    /// Optional originating user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Event creation time.
    pub timestamp: DateTime<Utc>,

    /// Event category tag.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    DEFAULT_KIND.to_string()
}

impl Notification {
    /// Builds a new notification with a generated UUID id and the current
    /// timestamp.
    #[must_use]
    pub fn new(content: impl Into<String>, user: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            user,
            timestamp: Utc::now(),
            kind: default_kind(),
        }
    }
}
