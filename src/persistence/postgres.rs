//! PostgreSQL implementation of the request store.

use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{EVENT_REQUEST_COLUMNS, EventRequestRow};
use crate::config::DeskConfig;
use crate::domain::{Decision, EventRequest, NewEventRequest, RequestId, RequestStatus, UserId};
use crate::error::DeskError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from configuration and applies pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`DeskError::PersistenceError`] if the database is
    /// unreachable or a migration fails.
    pub async fn connect(config: &DeskConfig) -> Result<Self, DeskError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await
            .map_err(|e| DeskError::PersistenceError(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DeskError::PersistenceError(e.to_string()))?;

        tracing::info!("database migrations applied");
        Ok(Self::new(pool))
    }

    /// Inserts a new pending request.
    ///
    /// # Errors
    ///
    /// Returns a [`DeskError::PersistenceError`] on database failure.
    pub async fn insert(&self, new: NewEventRequest) -> Result<EventRequest, DeskError> {
        let row = sqlx::query_as::<_, EventRequestRow>(&format!(
            "INSERT INTO event_requests \
             (id, name, email, event_title, category, location, image_url, status, user_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {EVENT_REQUEST_COLUMNS}"
        ))
        .bind(uuid::Uuid::from(RequestId::new()))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.event_title)
        .bind(new.category.as_str())
        .bind(&new.location)
        .bind(&new.image_url)
        .bind(RequestStatus::Pending.as_str())
        .bind(uuid::Uuid::from(new.user_id))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DeskError::PersistenceError(e.to_string()))?;

        EventRequest::try_from(row)
    }

    /// Loads a single request.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RequestNotFound`] if the row does not exist, or
    /// a [`DeskError::PersistenceError`] on database failure.
    pub async fn get(&self, id: RequestId) -> Result<EventRequest, DeskError> {
        let row = sqlx::query_as::<_, EventRequestRow>(&format!(
            "SELECT {EVENT_REQUEST_COLUMNS} FROM event_requests WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DeskError::PersistenceError(e.to_string()))?
        .ok_or(DeskError::RequestNotFound(*id.as_uuid()))?;

        EventRequest::try_from(row)
    }

    /// Lists requests newest first, optionally restricted to one owner.
    ///
    /// # Errors
    ///
    /// Returns a [`DeskError::PersistenceError`] on database failure.
    pub async fn list(&self, owner: Option<UserId>) -> Result<Vec<EventRequest>, DeskError> {
        let rows = if let Some(owner) = owner {
            sqlx::query_as::<_, EventRequestRow>(&format!(
                "SELECT {EVENT_REQUEST_COLUMNS} FROM event_requests \
                 WHERE user_id = $1 ORDER BY created_at DESC"
            ))
            .bind(*owner.as_uuid())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, EventRequestRow>(&format!(
                "SELECT {EVENT_REQUEST_COLUMNS} FROM event_requests ORDER BY created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| DeskError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(EventRequest::try_from).collect()
    }

    /// Applies a review decision to a pending request.
    ///
    /// The update only matches rows still in `pending`, so two concurrent
    /// reviews cannot both succeed.
    ///
    /// # Errors
    ///
    /// - [`DeskError::RequestNotFound`] if the row does not exist.
    /// - [`DeskError::AlreadyReviewed`] if it is no longer pending.
    /// - [`DeskError::PersistenceError`] on database failure.
    pub async fn review(
        &self,
        id: RequestId,
        decision: Decision,
        reviewer: UserId,
    ) -> Result<EventRequest, DeskError> {
        let updated = sqlx::query_as::<_, EventRequestRow>(&format!(
            "UPDATE event_requests SET status = $2, reviewed_at = $3, reviewed_by = $4 \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {EVENT_REQUEST_COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .bind(decision.target_status().as_str())
        .bind(Utc::now())
        .bind(*reviewer.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DeskError::PersistenceError(e.to_string()))?;

        match updated {
            Some(row) => EventRequest::try_from(row),
            None => {
                // Either missing or already reviewed; report which.
                let current = self.get(id).await?;
                Err(current
                    .status
                    .review(id, decision)
                    .err()
                    .unwrap_or_else(|| {
                        DeskError::Internal(format!("review of {id} matched no pending row"))
                    }))
            }
        }
    }
}
