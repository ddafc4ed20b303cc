//! REST API layer: route handlers, DTOs, extractors and router
//! composition.
//!
//! Resource endpoints are mounted under `/api/v1`; system endpoints sit at
//! the root.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod multipart;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::DeskConfig;
use crate::ws::handler::ws_handler;

/// Room for the text fields and multipart framing on top of the image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "event-desk",
        description = "Submit events for review and manage them from the admin dashboard."
    ),
    paths(
        handlers::system::health_handler,
        handlers::system::categories_handler,
        handlers::drafts::create_draft,
        handlers::drafts::get_draft,
        handlers::drafts::draft_image,
        handlers::drafts::edit_draft,
        handlers::drafts::discard_draft,
        handlers::drafts::confirm_draft,
        handlers::requests::list_requests,
        handlers::requests::get_request,
        handlers::requests::approve_request,
        handlers::requests::reject_request,
        handlers::dashboard::dashboard,
    ),
    tags(
        (name = "System", description = "Health and form configuration"),
        (name = "Drafts", description = "Submission form and review step"),
        (name = "Requests", description = "Request table and review actions"),
        (name = "Dashboard", description = "Status counts and charts"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the full application: REST routes, `/ws`, the `/storage` file
/// server, Swagger UI (feature `swagger-ui`) and the HTTP middleware stack.
pub fn build_app(state: AppState, config: &DeskConfig) -> Router {
    let app = Router::new()
        .merge(build_router())
        .route("/ws", get(ws_handler))
        .nest_service("/storage", ServeDir::new(&config.storage_root));

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.layer(DefaultBodyLimit::max(
        config.max_image_bytes.saturating_add(FORM_OVERHEAD_BYTES),
    ))
    .layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout_secs),
    ))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
