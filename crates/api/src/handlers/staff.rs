//! Handlers for the redemption counter (`/discount-coupons/staff`).

use axum::extract::{Path, State};
use axum::Json;
use quest_core::error::CoreError;
use quest_core::rewards::RuleStatus;
use quest_core::roles::ROLE_STAFF;
use quest_core::types::{DbId, Timestamp};
use quest_db::engine::redemption::{preview_by_coupon_token, redeem_all, staff_history};
use quest_db::engine::rewards::rule_statuses;
use quest_db::models::coupon::DiscountCoupon;
use quest_db::models::coupon_history::CouponHistoryEntry;
use quest_db::models::staff::Staff;
use quest_db::repositories::{AccountRepo, StaffRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{SessionResponse, TokenLoginRequest};
use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /discount-coupons/staff/redemptions`.
#[derive(Debug, Deserialize, Validate)]
pub struct RedeemRequest {
    #[validate(length(min = 1, max = 256))]
    pub coupon_token: String,
}

#[derive(Debug, Serialize)]
pub struct CouponItem {
    pub id: DbId,
    pub discount_id: String,
    pub price: i32,
}

impl From<&DiscountCoupon> for CouponItem {
    fn from(c: &DiscountCoupon) -> Self {
        Self {
            id: c.id,
            discount_id: c.discount_id.clone(),
            price: c.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub user_id: DbId,
    pub user_name: String,
    pub coupons: Vec<CouponItem>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct RedemptionResponse {
    pub history_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub coupon_token: String,
    pub total: i64,
    pub count: usize,
    pub used_by: DbId,
    pub used_at: Timestamp,
    pub coupons: Vec<CouponItem>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/discount-coupons/staff/session
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<TokenLoginRequest>,
) -> AppResult<Json<DataResponse<SessionResponse<Staff>>>> {
    input.validate()?;

    let mut conn = state.pool.acquire().await?;
    let staff = StaffRepo::find_by_token(&mut conn, &input.token)
        .await?
        .ok_or_else(|| CoreError::InvalidToken("Unknown staff token".into()))?;

    let access_token = generate_access_token(staff.id, ROLE_STAFF, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(DataResponse {
        data: SessionResponse {
            access_token,
            expires_in: state.config.jwt.access_token_expiry_mins * 60,
            principal: staff,
        },
    }))
}

/// GET /api/v1/discount-coupons/staff/coupon-tokens/{coupon_token}
///
/// What redeeming this attendee would hand out.
pub async fn preview(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(coupon_token): Path<String>,
) -> AppResult<Json<DataResponse<PreviewResponse>>> {
    let mut conn = state.pool.acquire().await?;
    let preview = preview_by_coupon_token(&mut conn, &coupon_token).await?;

    Ok(Json(DataResponse {
        data: PreviewResponse {
            user_id: preview.account.id,
            user_name: preview.account.nickname,
            coupons: preview.coupons.iter().map(CouponItem::from).collect(),
            total: preview.total,
        },
    }))
}

/// POST /api/v1/discount-coupons/staff/redemptions
///
/// Redeem every outstanding coupon of the attendee as one batch.
pub async fn redeem(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<RedeemRequest>,
) -> AppResult<Json<DataResponse<RedemptionResponse>>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;
    let account = AccountRepo::find_by_coupon_token(&mut tx, &input.coupon_token)
        .await?
        .ok_or_else(|| CoreError::InvalidToken("Unknown coupon token".into()))?;

    let redemption = redeem_all(&mut tx, account.id, staff.user_id, state.clock.now()).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: RedemptionResponse {
            history_id: redemption.history.id,
            user_id: account.id,
            user_name: account.nickname,
            coupon_token: account.coupon_token,
            total: redemption.history.total,
            count: redemption.coupons.len(),
            used_by: staff.user_id,
            used_at: redemption.history.used_at,
            coupons: redemption.coupons.iter().map(CouponItem::from).collect(),
        },
    }))
}

/// GET /api/v1/discount-coupons/staff/current/redemptions
pub async fn history(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CouponHistoryEntry>>>> {
    let mut conn = state.pool.acquire().await?;
    let entries = staff_history(&mut conn, staff.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/discount-coupons/staff/rules
pub async fn rules(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RuleStatus>>>> {
    let mut conn = state.pool.acquire().await?;
    let statuses = rule_statuses(&mut conn, &state.game.discount_rules).await?;
    Ok(Json(DataResponse { data: statuses }))
}
