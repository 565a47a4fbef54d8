//! DTOs for the message-submission service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /messages`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MessageRequest {
    /// Message content. Required, non-empty.
    #[serde(default)]
    pub content: String,
    /// Optional sender name.
    #[serde(default)]
    pub user: Option<String>,
}

/// Body returned by `POST /messages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Generated message identifier.
    pub id: String,
    /// Submitted content, echoed back.
    pub content: String,
    /// Sender name, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Acceptance time.
    pub timestamp: DateTime<Utc>,
    /// Always `"sent"`.
    pub status: String,
}
