//! Shared application state injected into all Axum handlers.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Caller, EventBus, UserId};
use crate::service::RequestService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Request service for all business logic.
    pub request_service: Arc<RequestService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Users allowed to review requests.
    pub admin_user_ids: Arc<HashSet<UserId>>,
}

impl AppState {
    /// Builds the state around a service, sharing its event bus.
    #[must_use]
    pub fn new(request_service: Arc<RequestService>, admin_user_ids: HashSet<UserId>) -> Self {
        let event_bus = request_service.event_bus().clone();
        Self {
            request_service,
            event_bus,
            admin_user_ids: Arc::new(admin_user_ids),
        }
    }

    /// Resolves a user id to a [`Caller`] with the right role.
    #[must_use]
    pub fn caller_for(&self, user_id: UserId) -> Caller {
        if self.admin_user_ids.contains(&user_id) {
            Caller::admin(user_id)
        } else {
            Caller::user(user_id)
        }
    }
}
