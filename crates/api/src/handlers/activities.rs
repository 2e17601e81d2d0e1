//! Handlers for the `/activities` resource: attendee and booth check-ins.

use axum::extract::{Path, State};
use axum::Json;
use quest_core::activity::ActivityType;
use quest_core::error::CoreError;
use quest_core::roles::ROLE_BOOTH;
use quest_db::engine::visits::{check_in, CheckInOutcome};
use quest_db::models::activity::{Activity, ActivityWithVisit};
use quest_db::repositories::{AccountRepo, ActivityRepo, VisitRepo};
use serde::Serialize;
use validator::Validate;

use super::{SessionResponse, TokenLoginRequest};
use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireBooth, RequirePlayer};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub activity_id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub outcome: CheckInOutcome,
}

#[derive(Debug, Serialize)]
pub struct BoothCountResponse {
    pub activity_id: i64,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Attendee handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/activities
pub async fn list(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ActivityWithVisit>>>> {
    let mut conn = state.pool.acquire().await?;
    let activities = ActivityRepo::list_with_visits(&mut conn, user.user_id).await?;
    Ok(Json(DataResponse { data: activities }))
}

/// POST /api/v1/activities/{activity_qr}
///
/// Attendee scanned an activity QR code.
pub async fn check_in_by_qrcode(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
    Path(activity_qr): Path<String>,
) -> AppResult<Json<DataResponse<CheckInResponse>>> {
    let mut tx = state.pool.begin().await?;
    let activity = ActivityRepo::find_by_qrcode_token(&mut tx, &activity_qr)
        .await?
        .ok_or_else(|| CoreError::NotFoundByKey {
            entity: "Activity",
            key: "qrcode_token".into(),
        })?;

    let outcome = check_in(&mut tx, user.user_id, activity.id, state.clock.now()).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: CheckInResponse {
            activity_id: activity.id,
            user_id: user.user_id,
            outcome,
        },
    }))
}

// ---------------------------------------------------------------------------
// Booth handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/activities/booth/session
///
/// Booth operators log in with the activity's secret token. Only activities
/// of type `booth` may open a session.
pub async fn booth_login(
    State(state): State<AppState>,
    Json(input): Json<TokenLoginRequest>,
) -> AppResult<Json<DataResponse<SessionResponse<Activity>>>> {
    input.validate()?;

    let mut conn = state.pool.acquire().await?;
    let activity = ActivityRepo::find_by_token(&mut conn, &input.token)
        .await?
        .ok_or_else(|| CoreError::InvalidToken("Unknown activity token".into()))?;

    if activity.kind()? != ActivityType::Booth {
        return Err(AppError::Core(CoreError::Forbidden(
            "Activity is not a booth".into(),
        )));
    }

    let access_token = generate_access_token(activity.id, ROLE_BOOTH, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(DataResponse {
        data: SessionResponse {
            access_token,
            expires_in: state.config.jwt.access_token_expiry_mins * 60,
            principal: activity,
        },
    }))
}

/// POST /api/v1/activities/booth/{user_qr}
///
/// Booth scanned an attendee's personal QR code.
pub async fn booth_check_in(
    RequireBooth(booth): RequireBooth,
    State(state): State<AppState>,
    Path(user_qr): Path<String>,
) -> AppResult<Json<DataResponse<CheckInResponse>>> {
    let mut tx = state.pool.begin().await?;
    let account = AccountRepo::find_by_qrcode_token(&mut tx, &user_qr)
        .await?
        .ok_or_else(|| CoreError::NotFoundByKey {
            entity: "Account",
            key: "qrcode_token".into(),
        })?;

    let outcome = check_in(&mut tx, account.id, booth.user_id, state.clock.now()).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: CheckInResponse {
            activity_id: booth.user_id,
            user_id: account.id,
            outcome,
        },
    }))
}

/// GET /api/v1/activities/booth/count
pub async fn booth_count(
    RequireBooth(booth): RequireBooth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BoothCountResponse>>> {
    let mut conn = state.pool.acquire().await?;
    let count = VisitRepo::count_by_activity(&mut conn, booth.user_id).await?;
    Ok(Json(DataResponse {
        data: BoothCountResponse {
            activity_id: booth.user_id,
            count,
        },
    }))
}
