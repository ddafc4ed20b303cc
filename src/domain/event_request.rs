//! The event request record and its review lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{RequestId, UserId};
use crate::error::DeskError;

/// Kind of event being proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    /// Family gathering.
    Family,
    /// Class, workshop or talk.
    Education,
    /// Wedding.
    Wedding,
    /// Party.
    Party,
}

impl Category {
    /// Every category, in the order the submission form lists them.
    pub const ALL: [Self; 4] = [Self::Family, Self::Education, Self::Wedding, Self::Party];

    /// Returns the wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Education => "Education",
            Self::Wedding => "Wedding",
            Self::Party => "Party",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DeskError::InvalidRequest(format!("unknown category: {s}")))
    }
}

/// Review state of an event request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Submitted and awaiting an administrator.
    Pending,
    /// Accepted by an administrator. Terminal.
    Approved,
    /// Declined by an administrator. Terminal.
    Rejected,
}

impl RequestStatus {
    /// Returns the lowercase wire and column name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` while an administrator can still act on the request.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Applies an administrator's decision.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::AlreadyReviewed`] if the status is not
    /// [`RequestStatus::Pending`].
    pub fn review(self, id: RequestId, decision: Decision) -> Result<Self, DeskError> {
        if self != Self::Pending {
            return Err(DeskError::AlreadyReviewed {
                id: *id.as_uuid(),
                status: self,
            });
        }
        Ok(decision.target_status())
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DeskError::InvalidRequest(format!("unknown status: {other}"))),
        }
    }
}

/// An administrator's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Move the request to [`RequestStatus::Approved`].
    Approve,
    /// Move the request to [`RequestStatus::Rejected`].
    Reject,
}

impl Decision {
    /// Status the request ends up in.
    #[must_use]
    pub const fn target_status(&self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

/// A stored event request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventRequest {
    /// Row identifier.
    pub id: RequestId,
    /// Name of the person submitting.
    pub name: String,
    /// Contact address of the submitter.
    pub email: String,
    /// Title of the proposed event.
    pub event_title: String,
    /// Event category.
    pub category: Category,
    /// Where the event takes place.
    pub location: String,
    /// Public URL of the uploaded image.
    pub image_url: String,
    /// Review state.
    pub status: RequestStatus,
    /// User who submitted the request.
    pub user_id: UserId,
    /// Insert timestamp.
    pub created_at: DateTime<Utc>,
    /// When an administrator approved or rejected the request.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Administrator who reviewed the request.
    pub reviewed_by: Option<UserId>,
}

/// Insert payload for a new request. The store assigns the id, the
/// `pending` status and the timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventRequest {
    /// Name of the person submitting.
    pub name: String,
    /// Contact address of the submitter.
    pub email: String,
    /// Title of the proposed event.
    pub event_title: String,
    /// Event category.
    pub category: Category,
    /// Where the event takes place.
    pub location: String,
    /// Public URL of the uploaded image.
    pub image_url: String,
    /// Owning user.
    pub user_id: UserId,
}

impl NewEventRequest {
    /// Materializes the payload as a freshly inserted, pending record.
    #[must_use]
    pub fn into_pending(self, id: RequestId, created_at: DateTime<Utc>) -> EventRequest {
        EventRequest {
            id,
            name: self.name,
            email: self.email,
            event_title: self.event_title,
            category: self.category,
            location: self.location,
            image_url: self.image_url,
            status: RequestStatus::Pending,
            user_id: self.user_id,
            created_at,
            reviewed_at: None,
            reviewed_by: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_exact_names_only() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().ok(), Some(c));
        }
        assert!("family".parse::<Category>().is_err());
        assert!("Concert".parse::<Category>().is_err());
    }

    #[test]
    fn pending_can_be_approved_or_rejected() {
        let id = RequestId::new();
        let approved = RequestStatus::Pending.review(id, Decision::Approve);
        assert_eq!(approved.ok(), Some(RequestStatus::Approved));
        let rejected = RequestStatus::Pending.review(id, Decision::Reject);
        assert_eq!(rejected.ok(), Some(RequestStatus::Rejected));
    }

    #[test]
    fn reviewed_requests_are_terminal() {
        let id = RequestId::new();
        for status in [RequestStatus::Approved, RequestStatus::Rejected] {
            for decision in [Decision::Approve, Decision::Reject] {
                let Err(err) = status.review(id, decision) else {
                    panic!("{status} must not move again");
                };
                assert!(matches!(err, DeskError::AlreadyReviewed { .. }));
            }
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let Ok(json) = serde_json::to_string(&RequestStatus::Approved) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"approved\"");
        assert_eq!("rejected".parse::<RequestStatus>().ok(), Some(RequestStatus::Rejected));
    }

    #[test]
    fn new_request_starts_pending() {
        let new = NewEventRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            event_title: "Birthday".to_string(),
            category: Category::Party,
            location: "Hall 2".to_string(),
            image_url: "http://localhost/x.png".to_string(),
            user_id: UserId::new(),
        };
        let record = new.into_pending(RequestId::new(), Utc::now());
        assert_eq!(record.status, RequestStatus::Pending);
        assert!(record.status.is_actionable());
        assert!(record.reviewed_at.is_none());
    }
}
