//! Request table handlers: list, detail, approve, reject.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ListParams, RequestDto, RequestListResponse};
use crate::app_state::AppState;
use crate::domain::{Caller, Decision, RequestId};
use crate::error::{DeskError, ErrorResponse};

/// `GET /requests` — Paginated request table.
///
/// Administrators see every request; other users see their own.
///
/// # Errors
///
/// Returns [`DeskError`] on storage failures.
#[utoipa::path(
    get,
    path = "/api/v1/requests",
    tag = "Requests",
    summary = "List event requests",
    description = "Returns the requests visible to the caller, newest first, optionally filtered by status.",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated request list", body = RequestListResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn list_requests(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, DeskError> {
    let requests = state.request_service.list_requests(&caller).await?;
    let rows: Vec<RequestDto> = requests
        .into_iter()
        .filter(|r| params.status.is_none_or(|s| r.status == s))
        .map(RequestDto::from)
        .collect();

    let (data, pagination) = params.paginate(rows);
    Ok(Json(RequestListResponse { data, pagination }))
}

/// `GET /requests/:id` — Request detail.
///
/// # Errors
///
/// Returns [`DeskError::RequestNotFound`] if the request does not exist
/// or is not visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/requests/{id}",
    tag = "Requests",
    summary = "Get an event request",
    params(
        ("id" = uuid::Uuid, Path, description = "Request UUID"),
    ),
    responses(
        (status = 200, description = "Request detail", body = RequestDto),
        (status = 404, description = "Request not found", body = ErrorResponse),
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, DeskError> {
    let record = state
        .request_service
        .get_request(&caller, RequestId::from_uuid(id))
        .await?;
    Ok(Json(RequestDto::from(record)))
}

/// `POST /requests/:id/approve` — Approve a pending request.
///
/// # Errors
///
/// Returns [`DeskError::Forbidden`], [`DeskError::RequestNotFound`] or
/// [`DeskError::AlreadyReviewed`].
#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/approve",
    tag = "Requests",
    summary = "Approve a request",
    params(
        ("id" = uuid::Uuid, Path, description = "Request UUID"),
    ),
    responses(
        (status = 200, description = "Request approved", body = RequestDto),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 409, description = "Request already reviewed", body = ErrorResponse),
    )
)]
pub async fn approve_request(
    state: State<AppState>,
    caller: Caller,
    id: Path<uuid::Uuid>,
) -> Result<impl IntoResponse, DeskError> {
    review(state, caller, id, Decision::Approve).await
}

/// `POST /requests/:id/reject` — Reject a pending request.
///
/// # Errors
///
/// Returns [`DeskError::Forbidden`], [`DeskError::RequestNotFound`] or
/// [`DeskError::AlreadyReviewed`].
#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/reject",
    tag = "Requests",
    summary = "Reject a request",
    params(
        ("id" = uuid::Uuid, Path, description = "Request UUID"),
    ),
    responses(
        (status = 200, description = "Request rejected", body = RequestDto),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 409, description = "Request already reviewed", body = ErrorResponse),
    )
)]
pub async fn reject_request(
    state: State<AppState>,
    caller: Caller,
    id: Path<uuid::Uuid>,
) -> Result<impl IntoResponse, DeskError> {
    review(state, caller, id, Decision::Reject).await
}

async fn review(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<uuid::Uuid>,
    decision: Decision,
) -> Result<Json<RequestDto>, DeskError> {
    let record = state
        .request_service
        .review(&caller, RequestId::from_uuid(id), decision)
        .await?;
    Ok(Json(RequestDto::from(record)))
}

/// Request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests))
        .route("/requests/{id}", get(get_request))
        .route("/requests/{id}/approve", post(approve_request))
        .route("/requests/{id}/reject", post(reject_request))
}
