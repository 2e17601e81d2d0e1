//! Coupon redemption at the counter, gift claiming and staff history.

use quest_core::error::CoreError;
use quest_core::rewards::{batch_total, CouponSource};
use quest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::PgConnection;

use crate::models::account::Account;
use crate::models::coupon::DiscountCoupon;
use crate::models::coupon_history::{CouponHistory, CouponHistoryEntry};
use crate::repositories::{AccountRepo, CouponGiftRepo, CouponHistoryRepo, CouponRepo};

use super::EngineResult;

/// One redeemed batch.
#[derive(Debug, Clone, Serialize)]
pub struct Redemption {
    pub history: CouponHistory,
    pub coupons: Vec<DiscountCoupon>,
}

/// Outstanding coupons of an attendee, as shown to staff before redeeming.
#[derive(Debug, Clone, Serialize)]
pub struct CouponPreview {
    pub account: Account,
    pub coupons: Vec<DiscountCoupon>,
    pub total: i64,
}

/// Redeem every outstanding coupon of `user_id` as one batch.
///
/// Outstanding rows are locked first, so two counters redeeming the same
/// attendee serialize and the second one finds nothing left. Only the locked
/// rows are marked; a coupon issued meanwhile waits for the next batch.
#[tracing::instrument(skip(conn))]
pub async fn redeem_all(
    conn: &mut PgConnection,
    user_id: DbId,
    staff_id: DbId,
    now: Timestamp,
) -> EngineResult<Redemption> {
    let unused = CouponRepo::list_unused_for_update(&mut *conn, user_id).await?;
    if unused.is_empty() {
        return Err(CoreError::NoAvailableCoupons.into());
    }

    let total = batch_total(unused.iter().map(|c| c.price));
    let history = CouponHistoryRepo::create(&mut *conn, user_id, staff_id, total, now).await?;

    let ids: Vec<DbId> = unused.iter().map(|c| c.id).collect();
    let coupons = CouponRepo::mark_used(&mut *conn, &ids, staff_id, history.id, now).await?;
    if coupons.is_empty() {
        return Err(CoreError::NoAvailableCoupons.into());
    }

    tracing::info!(history_id = history.id, count = coupons.len(), total, "Coupons redeemed");
    Ok(Redemption { history, coupons })
}

/// Outstanding coupons for the attendee holding `coupon_token`.
#[tracing::instrument(skip(conn, coupon_token))]
pub async fn preview_by_coupon_token(
    conn: &mut PgConnection,
    coupon_token: &str,
) -> EngineResult<CouponPreview> {
    let account = AccountRepo::find_by_coupon_token(&mut *conn, coupon_token)
        .await?
        .ok_or_else(|| CoreError::InvalidToken("unknown coupon token".into()))?;
    let coupons = list_unused_for_user(&mut *conn, account.id).await?;
    let total = batch_total(coupons.iter().map(|c| c.price));
    Ok(CouponPreview {
        account,
        coupons,
        total,
    })
}

/// Outstanding coupons of `user_id` without taking locks.
pub async fn list_unused_for_user(
    conn: &mut PgConnection,
    user_id: DbId,
) -> EngineResult<Vec<DiscountCoupon>> {
    Ok(CouponRepo::list_unused(conn, user_id).await?)
}

/// Turn a gift token into a coupon owned by `user_id`. Each token works once.
#[tracing::instrument(skip(conn, gift_token))]
pub async fn claim_gift(
    conn: &mut PgConnection,
    user_id: DbId,
    gift_token: &str,
) -> EngineResult<DiscountCoupon> {
    let gift = CouponGiftRepo::take_by_token(&mut *conn, gift_token)
        .await?
        .ok_or_else(|| CoreError::NotFoundByKey {
            entity: "DiscountCouponGift",
            key: "token".into(),
        })?;
    let coupon = CouponRepo::create_with_source(
        &mut *conn,
        &gift.discount_id,
        user_id,
        gift.price,
        CouponSource::Gift,
    )
    .await?;
    tracing::info!(gift_id = gift.id, coupon_id = coupon.id, "Gift claimed");
    Ok(coupon)
}

/// Redemptions handled by `staff_id`, newest first.
pub async fn staff_history(
    conn: &mut PgConnection,
    staff_id: DbId,
) -> EngineResult<Vec<CouponHistoryEntry>> {
    Ok(CouponHistoryRepo::list_by_staff(conn, staff_id).await?)
}
