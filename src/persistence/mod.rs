//! Persistence layer for event requests.
//!
//! [`RequestStore`] dispatches to PostgreSQL when persistence is enabled
//! and to an in-memory map otherwise.

pub mod memory;
pub mod models;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::domain::{Decision, EventRequest, NewEventRequest, RequestId, UserId};
use crate::error::DeskError;

/// Row storage for event requests.
#[derive(Debug)]
pub enum RequestStore {
    /// Durable storage in PostgreSQL.
    Postgres(PostgresStore),
    /// Process-local storage.
    Memory(MemoryStore),
}

impl RequestStore {
    /// Inserts a new pending request.
    ///
    /// # Errors
    ///
    /// Returns a [`DeskError::PersistenceError`] on database failure.
    pub async fn insert(&self, new: NewEventRequest) -> Result<EventRequest, DeskError> {
        match self {
            Self::Postgres(pg) => pg.insert(new).await,
            Self::Memory(mem) => Ok(mem.insert(new).await),
        }
    }

    /// Loads a single request.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RequestNotFound`] if absent, or a
    /// [`DeskError::PersistenceError`] on database failure.
    pub async fn get(&self, id: RequestId) -> Result<EventRequest, DeskError> {
        match self {
            Self::Postgres(pg) => pg.get(id).await,
            Self::Memory(mem) => mem.get(id).await,
        }
    }

    /// Lists requests newest first, optionally restricted to one owner.
    ///
    /// # Errors
    ///
    /// Returns a [`DeskError::PersistenceError`] on database failure.
    pub async fn list(&self, owner: Option<UserId>) -> Result<Vec<EventRequest>, DeskError> {
        match self {
            Self::Postgres(pg) => pg.list(owner).await,
            Self::Memory(mem) => Ok(mem.list(owner).await),
        }
    }

    /// Moves a pending request to approved or rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RequestNotFound`], [`DeskError::AlreadyReviewed`]
    /// or a [`DeskError::PersistenceError`].
    pub async fn review(
        &self,
        id: RequestId,
        decision: Decision,
        reviewer: UserId,
    ) -> Result<EventRequest, DeskError> {
        match self {
            Self::Postgres(pg) => pg.review(id, decision, reviewer).await,
            Self::Memory(mem) => mem.review(id, decision, reviewer).await,
        }
    }
}
