//! Redemption history model.

use quest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `coupon_histories` table. One per redemption batch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CouponHistory {
    pub id: DbId,
    pub user_id: DbId,
    pub staff_id: DbId,
    pub total: i64,
    pub used_at: Timestamp,
    pub created_at: Timestamp,
}

/// History row joined with the attendee's nickname for the staff console.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CouponHistoryEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub nickname: String,
    pub total: i64,
    pub used_at: Timestamp,
}
