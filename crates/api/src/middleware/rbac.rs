//! Role extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects sessions of any other role
//! with 403, so a booth token can never act as an attendee and vice versa.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use quest_core::error::CoreError;
use quest_core::roles::{ROLE_BOOTH, ROLE_PLAYER, ROLE_STAFF};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: &'static str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{role} session required"
        ))));
    }
    Ok(user)
}

/// Requires an attendee session; `user_id` is the account id.
pub struct RequirePlayer(pub AuthUser);

impl FromRequestParts<AppState> for RequirePlayer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_PLAYER).await.map(RequirePlayer)
    }
}

/// Requires a booth session; `user_id` is the activity id.
pub struct RequireBooth(pub AuthUser);

impl FromRequestParts<AppState> for RequireBooth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_BOOTH).await.map(RequireBooth)
    }
}

/// Requires a staff session; `user_id` is the staff id.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_STAFF).await.map(RequireStaff)
    }
}
