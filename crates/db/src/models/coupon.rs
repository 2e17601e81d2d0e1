//! Discount coupon model.

use quest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `discount_coupons` table.
///
/// `used_by`, `used_at` and `history_id` are either all set (redeemed) or
/// all null (outstanding). `source` is `rule` or `gift`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiscountCoupon {
    pub id: DbId,
    pub discount_id: String,
    pub user_id: DbId,
    pub price: i32,
    pub source: String,
    pub used_by: Option<DbId>,
    pub used_at: Option<Timestamp>,
    pub history_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl DiscountCoupon {
    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }
}
