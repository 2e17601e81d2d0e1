//! Handlers for the attendee side of `/discount-coupons`.

use axum::extract::State;
use axum::Json;
use quest_db::engine::redemption::claim_gift;
use quest_db::models::coupon::DiscountCoupon;
use quest_db::repositories::CouponRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequirePlayer;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /discount-coupons/gifts`.
#[derive(Debug, Deserialize, Validate)]
pub struct ClaimGiftRequest {
    #[validate(length(min = 1, max = 256))]
    pub token: String,
}

/// GET /api/v1/discount-coupons
///
/// Every coupon the caller owns, used or not.
pub async fn list_mine(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DiscountCoupon>>>> {
    let mut conn = state.pool.acquire().await?;
    let coupons = CouponRepo::list_by_user(&mut conn, user.user_id).await?;
    Ok(Json(DataResponse { data: coupons }))
}

/// POST /api/v1/discount-coupons/gifts
pub async fn claim(
    RequirePlayer(user): RequirePlayer,
    State(state): State<AppState>,
    Json(input): Json<ClaimGiftRequest>,
) -> AppResult<Json<DataResponse<DiscountCoupon>>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;
    let coupon = claim_gift(&mut tx, user.user_id, &input.token).await?;
    tx.commit().await?;

    Ok(Json(DataResponse { data: coupon }))
}
