//! Service error types with HTTP status code mapping.
//!
//! [`DeskError`] is the central error type. Each variant maps to a specific
//! HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RequestStatus;
use crate::domain::submission::FieldErrors;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "validation failed on 1 field(s)",
///     "details": { "email": ["Invalid email"] }
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
    /// Numeric error code (see [`DeskError`] for the ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details, e.g. per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                  |
/// |-----------|---------------------|------------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request              |
/// | 2000–2999 | State/Not Found     | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server              | 500 Internal Server Error    |
/// | 4000–4999 | Identity            | 401 / 403                    |
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    /// Malformed request that never reached field validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// One or more submission fields failed validation.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// Event request with the given ID was not found.
    #[error("event request not found: {0}")]
    RequestNotFound(uuid::Uuid),

    /// Draft with the given ID was not found (or belongs to someone else).
    #[error("draft not found: {0}")]
    DraftNotFound(uuid::Uuid),

    /// The request has already left the pending state.
    #[error("event request {id} is already {status}")]
    AlreadyReviewed {
        /// Request that was targeted.
        id: uuid::Uuid,
        /// Status it currently holds.
        status: RequestStatus,
    },

    /// An object already exists at the target storage path.
    #[error("object already exists: {0}")]
    ObjectExists(String),

    /// Writing the image to object storage failed.
    #[error("Image upload failed")]
    UploadFailed(String),

    /// Inserting the confirmed request failed.
    #[error("Failed to save data")]
    SaveFailed(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// No usable caller identity on the request.
    #[error("missing or invalid user identity")]
    Unauthenticated,

    /// Caller is authenticated but not allowed to perform the operation.
    #[error("administrator role required")]
    Forbidden,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DeskError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Validation(_) => 1002,
            Self::RequestNotFound(_) => 2001,
            Self::DraftNotFound(_) => 2002,
            Self::AlreadyReviewed { .. } => 2003,
            Self::ObjectExists(_) => 2004,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::UploadFailed(_) => 3002,
            Self::SaveFailed(_) => 3003,
            Self::Unauthenticated => 4001,
            Self::Forbidden => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RequestNotFound(_) | Self::DraftNotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyReviewed { .. } | Self::ObjectExists(_) => StatusCode::CONFLICT,
            Self::UploadFailed(_)
            | Self::SaveFailed(_)
            | Self::PersistenceError(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(fields) => serde_json::to_value(fields).ok(),
            _ => None,
        }
    }
}

impl IntoResponse for DeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::UploadFailed(cause) | Self::SaveFailed(cause) => {
                tracing::error!(code = self.error_code(), %cause, "{self}");
            }
            Self::PersistenceError(_) | Self::Internal(_) => {
                tracing::error!(code = self.error_code(), "{self}");
            }
            _ => {}
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
