//! System endpoints: health check and form configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::Category;
use crate::domain::submission::ACCEPTED_IMAGE_TYPES;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Options the submission form offers.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormOptions {
    categories: Vec<Category>,
    accepted_image_types: Vec<&'static str>,
    max_image_bytes: usize,
}

/// `GET /config/categories` — Categories and image rules for the form.
#[utoipa::path(
    get,
    path = "/config/categories",
    tag = "System",
    summary = "Submission form options",
    description = "Returns the event categories and the accepted image formats.",
    responses(
        (status = 200, description = "Form options", body = FormOptions),
    )
)]
pub async fn categories_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(FormOptions {
            categories: Category::ALL.to_vec(),
            accepted_image_types: ACCEPTED_IMAGE_TYPES.to_vec(),
            max_image_bytes: state.request_service.max_image_bytes(),
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/categories", get(categories_handler))
}
