//! Handlers for the `/games` resource: submissions, leaderboard, level info.

use axum::extract::{Path, Query, State};
use axum::Json;
use quest_core::error::CoreError;
use quest_db::engine::leaderboard::{leaderboard, Leaderboard};
use quest_db::engine::progression::submit_level;
use quest_db::engine::rewards::issue_if_eligible;
use quest_db::models::coupon::DiscountCoupon;
use quest_db::repositories::AccountRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePlayer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub current_level: i32,
    pub unlock_level: i32,
    /// Coupons earned by this submission.
    pub coupons: Vec<DiscountCoupon>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LevelInfoResponse {
    pub level: i32,
    pub speed: i32,
    pub notes: i32,
    pub sheet: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/games/submissions
///
/// Pass the next level. Level advance and coupon issuance commit together.
pub async fn submit(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SubmitResponse>>> {
    let now = state.clock.now();

    let mut tx = state.pool.begin().await?;
    let advance = submit_level(&mut tx, &state.game, user.user_id, now).await?;
    let coupons = issue_if_eligible(
        &mut tx,
        &state.game.discount_rules,
        user.user_id,
        advance.current_level,
    )
    .await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: SubmitResponse {
            current_level: advance.current_level,
            unlock_level: advance.unlock_level,
            coupons,
        },
    }))
}

/// GET /api/v1/games/leaderboards?page=N
///
/// `page` defaults to 1. All views come from one read-only snapshot.
pub async fn leaderboards(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<Leaderboard>>> {
    let page = params.page.unwrap_or(1);

    let mut tx = quest_db::begin_read_snapshot(&state.pool).await?;
    let board = leaderboard(&mut tx, Some(user.user_id), page).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: board }))
}

/// GET /api/v1/games/levels/{level}
///
/// `level` is a number, or `current` for the level the caller plays next.
pub async fn level_info(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> AppResult<Json<DataResponse<LevelInfoResponse>>> {
    let level = if level == "current" {
        let mut conn = state.pool.acquire().await?;
        let account = AccountRepo::find_by_id(&mut conn, user.user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Account",
                id: user.user_id,
            })?;
        account.current_level + 1
    } else {
        match level.parse::<i32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "invalid level '{level}'"
                ))))
            }
        }
    };

    let spec = state.game.level(level).ok_or_else(|| CoreError::NotFoundByKey {
        entity: "Level",
        key: level.to_string(),
    })?;
    let sheet = state.game.sheet_for(spec).ok_or_else(|| {
        CoreError::Configuration(format!("sheet music shorter than level {level}"))
    })?;

    Ok(Json(DataResponse {
        data: LevelInfoResponse {
            level,
            speed: spec.speed,
            notes: spec.notes,
            sheet: sheet.to_vec(),
        },
    }))
}
