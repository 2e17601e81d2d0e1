//! Handlers for the `/friendships` resource.

use axum::extract::State;
use axum::Json;
use quest_core::error::CoreError;
use quest_db::engine::friends::{add_friend, friend_stats, FriendStats, FriendshipOutcome};
use quest_db::repositories::AccountRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequirePlayer;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /friendships`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddFriendRequest {
    /// The other attendee's personal QR code.
    #[validate(length(min = 1, max = 256))]
    pub qrcode_token: String,
}

#[derive(Debug, Serialize)]
pub struct AddFriendResponse {
    pub friend_id: i64,
    pub friend_nickname: String,
    #[serde(flatten)]
    pub outcome: FriendshipOutcome,
}

/// POST /api/v1/friendships
pub async fn add(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
    Json(input): Json<AddFriendRequest>,
) -> AppResult<Json<DataResponse<AddFriendResponse>>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;
    let target = AccountRepo::find_by_qrcode_token(&mut tx, &input.qrcode_token)
        .await?
        .ok_or_else(|| CoreError::NotFoundByKey {
            entity: "Account",
            key: "qrcode_token".into(),
        })?;

    let outcome = add_friend(
        &mut tx,
        user.user_id,
        target.id,
        state.game.friend_capacity_multiplier,
        state.clock.now(),
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: AddFriendResponse {
            friend_id: target.id,
            friend_nickname: target.nickname,
            outcome,
        },
    }))
}

/// GET /api/v1/friendships/stats
pub async fn stats(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<FriendStats>>> {
    let mut conn = state.pool.acquire().await?;
    let stats = friend_stats(&mut conn, user.user_id, state.game.friend_capacity_multiplier).await?;
    Ok(Json(DataResponse { data: stats }))
}
