//! Pre-minted gift coupon model.

use quest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `discount_coupon_gifts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiscountCouponGift {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub token: String,
    pub price: i32,
    pub discount_id: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCouponGift {
    pub token: String,
    pub price: i32,
    pub discount_id: String,
}
