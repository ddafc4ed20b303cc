//! Submission drafts held between "review" and "confirm".
//!
//! A draft is a validated [`Submission`] that has not been written
//! anywhere yet. The submitter can look at it, edit it, throw it away or
//! confirm it; only confirmation uploads the image and inserts a row.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::submission::Submission;
use super::{DraftId, UserId};
use crate::error::DeskError;

/// A validated submission awaiting confirmation.
#[derive(Debug, Clone)]
pub struct Draft {
    /// Draft identifier.
    pub id: DraftId,
    /// User who created the draft.
    pub owner: UserId,
    /// Validated content.
    pub submission: Submission,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last edit.
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    /// Creates a new draft owned by `owner`.
    #[must_use]
    pub fn new(owner: UserId, submission: Submission) -> Self {
        let now = Utc::now();
        Self {
            id: DraftId::new(),
            owner,
            submission,
            created_at: now,
            updated_at: now,
        }
    }
}

/// In-memory draft storage.
///
/// Lookups are scoped to the owner: a draft that exists but belongs to a
/// different user is reported as not found.
#[derive(Debug, Default)]
pub struct DraftStore {
    drafts: RwLock<HashMap<DraftId, Draft>>,
}

impl DraftStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a draft, returning its id.
    pub async fn insert(&self, draft: Draft) -> DraftId {
        let id = draft.id;
        self.drafts.write().await.insert(id, draft);
        id
    }

    /// Returns a copy of the owner's draft.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::DraftNotFound`] if no such draft exists for
    /// this owner.
    pub async fn get(&self, owner: UserId, id: DraftId) -> Result<Draft, DeskError> {
        let map = self.drafts.read().await;
        map.get(&id)
            .filter(|d| d.owner == owner)
            .cloned()
            .ok_or(DeskError::DraftNotFound(*id.as_uuid()))
    }

    /// Replaces the submission of an existing draft.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::DraftNotFound`] if no such draft exists for
    /// this owner.
    pub async fn replace(
        &self,
        owner: UserId,
        id: DraftId,
        submission: Submission,
    ) -> Result<Draft, DeskError> {
        let mut map = self.drafts.write().await;
        let draft = map
            .get_mut(&id)
            .filter(|d| d.owner == owner)
            .ok_or(DeskError::DraftNotFound(*id.as_uuid()))?;
        draft.submission = submission;
        draft.updated_at = Utc::now();
        Ok(draft.clone())
    }

    /// Removes and returns the owner's draft.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::DraftNotFound`] if no such draft exists for
    /// this owner.
    pub async fn take(&self, owner: UserId, id: DraftId) -> Result<Draft, DeskError> {
        let mut map = self.drafts.write().await;
        match map.get(&id) {
            Some(d) if d.owner == owner => map
                .remove(&id)
                .ok_or(DeskError::DraftNotFound(*id.as_uuid())),
            _ => Err(DeskError::DraftNotFound(*id.as_uuid())),
        }
    }

    /// Puts a previously taken draft back, keeping its id.
    pub async fn restore(&self, draft: Draft) {
        self.drafts.write().await.insert(draft.id, draft);
    }

    /// Drops drafts whose last edit is older than `ttl`. Returns how many
    /// were removed.
    pub async fn purge_older_than(&self, ttl: Duration) -> usize {
        let Some(cutoff) = Utc::now().checked_sub_signed(ttl) else {
            return 0;
        };
        let mut map = self.drafts.write().await;
        let before = map.len();
        map.retain(|_, d| d.updated_at >= cutoff);
        before - map.len()
    }

    /// Returns the number of drafts held.
    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }

    /// Returns `true` if the store holds no drafts.
    pub async fn is_empty(&self) -> bool {
        self.drafts.read().await.is_empty()
    }
}
