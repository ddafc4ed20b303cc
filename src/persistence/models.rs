//! Database row model for the `event_requests` table.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, EventRequest, RequestId, RequestStatus, UserId};
use crate::error::DeskError;

/// Column list shared by every query returning full rows.
pub const EVENT_REQUEST_COLUMNS: &str = "id, name, email, event_title, category, location, \
     image_url, status, user_id, created_at, reviewed_at, reviewed_by";

/// A raw row from `event_requests`. Enum columns are stored as text and
/// checked on conversion.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRequestRow {
    /// Primary key.
    pub id: Uuid,
    /// Submitter name.
    pub name: String,
    /// Submitter email.
    pub email: String,
    /// Event title.
    pub event_title: String,
    /// Category name.
    pub category: String,
    /// Event location.
    pub location: String,
    /// Public image URL.
    pub image_url: String,
    /// Status name.
    pub status: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
    /// Review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Reviewer.
    pub reviewed_by: Option<Uuid>,
}

impl TryFrom<EventRequestRow> for EventRequest {
    type Error = DeskError;

    fn try_from(row: EventRequestRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, value: &str| {
            DeskError::PersistenceError(format!("row {}: unexpected {what} {value:?}", row.id))
        };
        let category = row
            .category
            .parse::<Category>()
            .map_err(|_| corrupt("category", &row.category))?;
        let status = row
            .status
            .parse::<RequestStatus>()
            .map_err(|_| corrupt("status", &row.status))?;

        Ok(Self {
            id: RequestId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            event_title: row.event_title,
            category,
            location: row.location,
            image_url: row.image_url,
            status,
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
            reviewed_at: row.reviewed_at,
            reviewed_by: row.reviewed_by.map(UserId::from_uuid),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn row() -> EventRequestRow {
        EventRequestRow {
            id: Uuid::new_v4(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            event_title: "Wedding of Sam".to_string(),
            category: "Wedding".to_string(),
            location: "Chapel".to_string(),
            image_url: "http://x/images/event-images/1.png".to_string(),
            status: "approved".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            reviewed_at: Some(Utc::now()),
            reviewed_by: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn converts_valid_row() {
        let Ok(record) = EventRequest::try_from(row()) else {
            panic!("valid row rejected");
        };
        assert_eq!(record.category, Category::Wedding);
        assert_eq!(record.status, RequestStatus::Approved);
        assert!(record.reviewed_by.is_some());
    }

    #[test]
    fn rejects_unknown_status() {
        let mut bad = row();
        bad.status = "archived".to_string();
        let Err(err) = EventRequest::try_from(bad) else {
            panic!("unknown status accepted");
        };
        assert!(matches!(err, DeskError::PersistenceError(_)));
    }
}
