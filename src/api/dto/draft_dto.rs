//! Draft review DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Category, Draft, DraftId};

/// Summary shown on the review step before the submitter confirms.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftDto {
    /// Draft identifier, used to edit, discard or confirm.
    pub draft_id: DraftId,
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
    /// Attached image.
    pub image: ImagePreviewDto,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

/// Image metadata with a link to the preview bytes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImagePreviewDto {
    /// Original file name.
    pub file_name: String,
    /// Media type.
    pub content_type: String,
    /// Size in bytes.
    pub size_bytes: usize,
    /// Relative URL serving the image for preview.
    pub preview_url: String,
}

impl From<&Draft> for DraftDto {
    fn from(d: &Draft) -> Self {
        let sub = &d.submission;
        Self {
            draft_id: d.id,
            name: sub.fields.name.clone(),
            email: sub.fields.email.clone(),
            event: sub.fields.event.clone(),
            category: sub.category,
            location: sub.fields.location.clone(),
            image: ImagePreviewDto {
                file_name: sub.image.file_name.clone(),
                content_type: sub.image.content_type.clone(),
                size_bytes: sub.image.bytes.len(),
                preview_url: format!("/api/v1/drafts/{}/image", d.id),
            },
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
