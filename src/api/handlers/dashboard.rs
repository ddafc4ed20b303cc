//! Dashboard handler: status counts and chart series.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Caller;
use crate::domain::stats::DashboardSummary;
use crate::error::{DeskError, ErrorResponse};

/// `GET /dashboard` — Counts per status, approvals per day and the status
/// pie.
///
/// # Errors
///
/// Returns [`DeskError`] on storage failures.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Dashboard summary",
    description = "Aggregates the requests visible to the caller: totals per status, approved requests bucketed by submission date, and the approved/pending/rejected pie slices.",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<impl IntoResponse, DeskError> {
    let summary = state.request_service.dashboard(&caller).await?;
    Ok(Json(summary))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
