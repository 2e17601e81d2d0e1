//! Handlers for the `/users` resource (attendee login, own profile).

use axum::extract::State;
use axum::Json;
use quest_core::error::CoreError;
use quest_core::roles::ROLE_PLAYER;
use quest_db::engine::accounts::open_account;
use quest_db::models::account::Account;
use quest_db::repositories::AccountRepo;
use validator::Validate;

use super::{SessionResponse, TokenLoginRequest};
use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePlayer;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users/session
///
/// Exchange an external identity token for a session. The identity provider
/// is only consulted the first time a token is seen; that call also creates
/// the account.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<TokenLoginRequest>,
) -> AppResult<Json<DataResponse<SessionResponse<Account>>>> {
    input.validate()?;

    let mut conn = state.pool.acquire().await?;
    let account = match AccountRepo::find_by_auth_token(&mut conn, &input.token).await? {
        Some(account) => account,
        None => {
            let identity = state.identity.resolve(&input.token).await?;
            open_account(
                &mut conn,
                &input.token,
                &identity.user_id,
                state.game.initial_unlock_level,
                state.clock.now(),
            )
            .await?
        }
    };

    let access_token = generate_access_token(account.id, ROLE_PLAYER, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(DataResponse {
        data: SessionResponse {
            access_token,
            expires_in: state.config.jwt.access_token_expiry_mins * 60,
            principal: account,
        },
    }))
}

/// GET /api/v1/users/me
pub async fn me(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Account>>> {
    let mut conn = state.pool.acquire().await?;
    let account = AccountRepo::find_by_id(&mut conn, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Account",
            id: user.user_id,
        })?;
    Ok(Json(DataResponse { data: account }))
}
