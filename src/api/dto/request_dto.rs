//! Request table and detail DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::PaginationMeta;
use crate::domain::{Category, EventRequest, RequestId, RequestStatus, UserId};

/// One row of the request table, also used for the detail view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestDto {
    /// Request identifier.
    pub id: RequestId,
    /// Submitter's name.
    pub name: String,
    /// Submitter's email.
    pub email: String,
    /// Event title.
    pub event: String,
    /// Event category.
    pub category: Category,
    /// Event location.
    pub location: String,
    /// Public URL of the uploaded image.
    pub image_url: String,
    /// Review status.
    pub status: RequestStatus,
    /// Whether Approve / Reject are still offered.
    pub actionable: bool,
    /// Submitting user.
    pub user_id: UserId,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Review time, once reviewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Reviewing administrator, once reviewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<UserId>,
}

impl From<EventRequest> for RequestDto {
    fn from(r: EventRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            event: r.event_title,
            category: r.category,
            location: r.location,
            image_url: r.image_url,
            actionable: r.status.is_actionable(),
            status: r.status,
            user_id: r.user_id,
            created_at: r.created_at,
            reviewed_at: r.reviewed_at,
            reviewed_by: r.reviewed_by,
        }
    }
}

/// Paginated response for `GET /api/v1/requests`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestListResponse {
    /// Requests on this page.
    pub data: Vec<RequestDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
