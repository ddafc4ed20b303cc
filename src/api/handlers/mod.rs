//! REST endpoint handlers organized by resource.

pub mod dashboard;
pub mod drafts;
pub mod requests;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(drafts::routes())
        .merge(requests::routes())
        .merge(dashboard::routes())
}
