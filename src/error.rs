//! Service error types with HTTP status code mapping.
//!
//! [`ServiceError`] is the central error type shared by all binaries. Each
//! variant maps to a specific HTTP status code and structured JSON error
//! response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: content is required",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges below).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 3000–3999 | Server     | 500 Internal Server Error |
/// | 4000–4999 | Upstream   | 502 Bad Gateway           |
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A required query parameter was missing or not a number.
    #[error("query param '{0}' must be a number")]
    InvalidOperand(&'static str),

    /// An upstream collaborator service could not be reached or
    /// returned an unusable response.
    #[error("{service} service unavailable")]
    Upstream {
        /// Name of the upstream service that failed.
        service: &'static str,
        /// Underlying failure description.
        detail: String,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidOperand(_) => 1002,
            Self::Internal(_) => 3000,
            Self::Upstream { .. } => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidOperand(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            Self::Upstream { detail, .. } => Some(detail.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ServiceError::InvalidRequest("content is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn operand_maps_to_400() {
        let err = ServiceError::InvalidOperand("a");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "query param 'a' must be a number");
    }

    #[test]
    fn upstream_maps_to_502() {
        let err = ServiceError::Upstream {
            service: "sum",
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), 4001);
        assert_eq!(err.to_string(), "sum service unavailable");
    }

    #[test]
    fn error_body_serializes_without_null_details() {
        let body = ErrorResponse {
            error: ErrorBody {
                code: 1001,
                message: "invalid request: content is required".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap_or_default();
        assert!(json.contains("\"code\":1001"));
        assert!(!json.contains("details"));
    }
}
