//! Request extractors shared by the REST and WebSocket handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::domain::{Caller, UserId};
use crate::error::DeskError;

/// Header carrying the authenticated user id, set by the identity proxy.
pub const USER_ID_HEADER: &str = "x-user-id";

impl FromRequestParts<AppState> for Caller {
    type Rejection = DeskError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<UserId>().ok())
            .ok_or(DeskError::Unauthenticated)?;
        Ok(state.caller_for(user_id))
    }
}
