//! Repository for the `coupon_histories` table.

use quest_core::types::{DbId, Timestamp};
use sqlx::PgConnection;

use crate::models::coupon_history::{CouponHistory, CouponHistoryEntry};

const COLUMNS: &str = "id, user_id, staff_id, total, used_at, created_at";

pub struct CouponHistoryRepo;

impl CouponHistoryRepo {
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        staff_id: DbId,
        total: i64,
        used_at: Timestamp,
    ) -> Result<CouponHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO coupon_histories (user_id, staff_id, total, used_at, created_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CouponHistory>(&query)
            .bind(user_id)
            .bind(staff_id)
            .bind(total)
            .bind(used_at)
            .fetch_one(conn)
            .await
    }

    /// Redemptions handled by `staff_id`, most recent first.
    pub async fn list_by_staff(
        conn: &mut PgConnection,
        staff_id: DbId,
    ) -> Result<Vec<CouponHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, CouponHistoryEntry>(
            "SELECT h.id, h.user_id, a.nickname, h.total, h.used_at \
             FROM coupon_histories h \
             JOIN accounts a ON a.id = h.user_id \
             WHERE h.staff_id = $1 \
             ORDER BY h.used_at DESC, h.id DESC",
        )
        .bind(staff_id)
        .fetch_all(conn)
        .await
    }

    pub async fn count_by_user(conn: &mut PgConnection, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM coupon_histories WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(conn)
            .await
    }
}
