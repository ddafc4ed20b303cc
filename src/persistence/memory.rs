//! In-memory request store, used when persistence is disabled and in tests.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Decision, EventRequest, NewEventRequest, RequestId, UserId};
use crate::error::DeskError;

/// Request rows held in a `RwLock<HashMap<...>>`.
///
/// Reviews take the write lock for the check-and-set, so concurrent
/// decisions on the same request are serialized and only the first wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<RequestId, EventRequest>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new pending request.
    pub async fn insert(&self, new: NewEventRequest) -> EventRequest {
        let record = new.into_pending(RequestId::new(), Utc::now());
        self.rows.write().await.insert(record.id, record.clone());
        record
    }

    /// Loads a single request.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RequestNotFound`] if the request does not exist.
    pub async fn get(&self, id: RequestId) -> Result<EventRequest, DeskError> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DeskError::RequestNotFound(*id.as_uuid()))
    }

    /// Lists requests newest first, optionally restricted to one owner.
    pub async fn list(&self, owner: Option<UserId>) -> Vec<EventRequest> {
        let map = self.rows.read().await;
        let mut rows: Vec<EventRequest> = map
            .values()
            .filter(|r| owner.is_none_or(|o| r.user_id == o))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    /// Applies a review decision to a pending request.
    ///
    /// # Errors
    ///
    /// - [`DeskError::RequestNotFound`] if the request does not exist.
    /// - [`DeskError::AlreadyReviewed`] if it is no longer pending.
    pub async fn review(
        &self,
        id: RequestId,
        decision: Decision,
        reviewer: UserId,
    ) -> Result<EventRequest, DeskError> {
        let mut map = self.rows.write().await;
        let record = map
            .get_mut(&id)
            .ok_or(DeskError::RequestNotFound(*id.as_uuid()))?;
        record.status = record.status.review(id, decision)?;
        record.reviewed_at = Some(Utc::now());
        record.reviewed_by = Some(reviewer);
        Ok(record.clone())
    }

    /// Returns the number of stored requests.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if no requests are stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}
