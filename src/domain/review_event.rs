//! Domain events emitted when a request is submitted or reviewed.
//!
//! Every state change publishes a [`ReviewEvent`] through the
//! [`super::EventBus`]; WebSocket clients receive the ones matching their
//! subscription.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Category, RequestId, UserId};

/// Event emitted after a request is created or changes status.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ReviewEvent {
    /// A draft was confirmed and stored as a pending request.
    RequestSubmitted {
        /// New request.
        request_id: RequestId,
        /// Submitter.
        user_id: UserId,
        /// Event category.
        category: Category,
        /// Insert timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An administrator approved a pending request.
    RequestApproved {
        /// Reviewed request.
        request_id: RequestId,
        /// Submitter.
        user_id: UserId,
        /// Administrator who approved it.
        reviewed_by: UserId,
        /// Review timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An administrator rejected a pending request.
    RequestRejected {
        /// Reviewed request.
        request_id: RequestId,
        /// Submitter.
        user_id: UserId,
        /// Administrator who rejected it.
        reviewed_by: UserId,
        /// Review timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ReviewEvent {
    /// Returns the request this event concerns.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        match self {
            Self::RequestSubmitted { request_id, .. }
            | Self::RequestApproved { request_id, .. }
            | Self::RequestRejected { request_id, .. } => *request_id,
        }
    }

    /// Returns the user who owns the request.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        match self {
            Self::RequestSubmitted { user_id, .. }
            | Self::RequestApproved { user_id, .. }
            | Self::RequestRejected { user_id, .. } => *user_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::RequestSubmitted { .. } => "request_submitted",
            Self::RequestApproved { .. } => "request_approved",
            Self::RequestRejected { .. } => "request_rejected",
        }
    }
}
