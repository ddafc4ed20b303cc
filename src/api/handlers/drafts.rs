//! Submission form handlers: create, review, edit, discard and confirm a
//! draft.

use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{DraftDto, RequestDto};
use crate::api::multipart::SubmissionForm;
use crate::app_state::AppState;
use crate::domain::{Caller, DraftId};
use crate::error::{DeskError, ErrorResponse};

/// `POST /drafts` — Validate a submission and hold it for review.
///
/// # Errors
///
/// Returns [`DeskError::Validation`] when the form is invalid.
#[utoipa::path(
    post,
    path = "/api/v1/drafts",
    tag = "Drafts",
    summary = "Submit the event form for review",
    description = "Validates the multipart form (name, email, event, location, category, image) and returns a review summary. Nothing is stored until the draft is confirmed.",
    request_body(content = crate::domain::SubmissionFields, content_type = "multipart/form-data", description = "Event request form plus an `image` file part"),
    responses(
        (status = 201, description = "Draft created", body = DraftDto),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn create_draft(
    State(state): State<AppState>,
    caller: Caller,
    multipart: Multipart,
) -> Result<impl IntoResponse, DeskError> {
    let max_image_bytes = state.request_service.max_image_bytes();
    let form = SubmissionForm::read(multipart, max_image_bytes).await?;
    let draft = state
        .request_service
        .create_draft(caller.user_id, form.fields, form.image)
        .await?;
    Ok((StatusCode::CREATED, Json(DraftDto::from(&draft))))
}

/// `GET /drafts/:id` — Review summary of a draft.
///
/// # Errors
///
/// Returns [`DeskError::DraftNotFound`] if the caller has no such draft.
#[utoipa::path(
    get,
    path = "/api/v1/drafts/{id}",
    tag = "Drafts",
    summary = "Get a draft",
    params(
        ("id" = uuid::Uuid, Path, description = "Draft UUID"),
    ),
    responses(
        (status = 200, description = "Draft summary", body = DraftDto),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn get_draft(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, DeskError> {
    let draft = state
        .request_service
        .get_draft(caller.user_id, DraftId::from_uuid(id))
        .await?;
    Ok(Json(DraftDto::from(&draft)))
}

/// `GET /drafts/:id/image` — Image preview of a draft.
///
/// # Errors
///
/// Returns [`DeskError::DraftNotFound`] if the caller has no such draft.
#[utoipa::path(
    get,
    path = "/api/v1/drafts/{id}/image",
    tag = "Drafts",
    summary = "Preview the draft image",
    params(
        ("id" = uuid::Uuid, Path, description = "Draft UUID"),
    ),
    responses(
        (status = 200, description = "Image bytes with the uploaded media type"),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn draft_image(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, DeskError> {
    let image = state
        .request_service
        .draft_image(caller.user_id, DraftId::from_uuid(id))
        .await?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
}

/// `PUT /drafts/:id` — Replace the draft content.
///
/// An edit without an image keeps the image already attached.
///
/// # Errors
///
/// Returns [`DeskError::DraftNotFound`] or [`DeskError::Validation`].
#[utoipa::path(
    put,
    path = "/api/v1/drafts/{id}",
    tag = "Drafts",
    summary = "Edit a draft",
    params(
        ("id" = uuid::Uuid, Path, description = "Draft UUID"),
    ),
    request_body(content = crate::domain::SubmissionFields, content_type = "multipart/form-data", description = "Event request form; the `image` part is optional"),
    responses(
        (status = 200, description = "Draft updated", body = DraftDto),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn edit_draft(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<uuid::Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, DeskError> {
    let max_image_bytes = state.request_service.max_image_bytes();
    let form = SubmissionForm::read(multipart, max_image_bytes).await?;
    let draft = state
        .request_service
        .edit_draft(caller.user_id, DraftId::from_uuid(id), form.fields, form.image)
        .await?;
    Ok(Json(DraftDto::from(&draft)))
}

/// `DELETE /drafts/:id` — Discard a draft.
///
/// # Errors
///
/// Returns [`DeskError::DraftNotFound`] if the caller has no such draft.
#[utoipa::path(
    delete,
    path = "/api/v1/drafts/{id}",
    tag = "Drafts",
    summary = "Discard a draft",
    params(
        ("id" = uuid::Uuid, Path, description = "Draft UUID"),
    ),
    responses(
        (status = 204, description = "Draft discarded"),
        (status = 404, description = "Draft not found", body = ErrorResponse),
    )
)]
pub async fn discard_draft(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, DeskError> {
    state
        .request_service
        .discard_draft(caller.user_id, DraftId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /drafts/:id/confirm` — Upload the image and store the request.
///
/// # Errors
///
/// Returns [`DeskError::UploadFailed`] or [`DeskError::SaveFailed`]; the
/// draft survives either failure.
#[utoipa::path(
    post,
    path = "/api/v1/drafts/{id}/confirm",
    tag = "Drafts",
    summary = "Confirm a draft",
    description = "Uploads the image to object storage and inserts the request with status `pending`.",
    params(
        ("id" = uuid::Uuid, Path, description = "Draft UUID"),
    ),
    responses(
        (status = 201, description = "Request stored", body = RequestDto),
        (status = 404, description = "Draft not found", body = ErrorResponse),
        (status = 500, description = "Image upload failed or failed to save data", body = ErrorResponse),
    )
)]
pub async fn confirm_draft(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, DeskError> {
    let record = state
        .request_service
        .confirm_draft(caller.user_id, DraftId::from_uuid(id))
        .await?;
    Ok((StatusCode::CREATED, Json(RequestDto::from(record))))
}

/// Draft routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drafts", post(create_draft))
        .route(
            "/drafts/{id}",
            get(get_draft).put(edit_draft).delete(discard_draft),
        )
        .route("/drafts/{id}/image", get(draft_image))
        .route("/drafts/{id}/confirm", post(confirm_draft))
}
