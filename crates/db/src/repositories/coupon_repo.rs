//! Repository for the `discount_coupons` table.

use quest_core::rewards::CouponSource;
use quest_core::types::{DbId, Timestamp};
use sqlx::PgConnection;

use crate::models::coupon::DiscountCoupon;

const COLUMNS: &str =
    "id, discount_id, user_id, price, source, used_by, used_at, history_id, created_at";

pub struct CouponRepo;

impl CouponRepo {
    /// Insert an unused rule-issued coupon.
    pub async fn create(
        conn: &mut PgConnection,
        discount_id: &str,
        user_id: DbId,
        price: i32,
    ) -> Result<DiscountCoupon, sqlx::Error> {
        Self::create_with_source(conn, discount_id, user_id, price, CouponSource::Rule).await
    }

    /// Insert an unused coupon, recording where it came from.
    pub async fn create_with_source(
        conn: &mut PgConnection,
        discount_id: &str,
        user_id: DbId,
        price: i32,
        source: CouponSource,
    ) -> Result<DiscountCoupon, sqlx::Error> {
        let query = format!(
            "INSERT INTO discount_coupons (discount_id, user_id, price, source) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiscountCoupon>(&query)
            .bind(discount_id)
            .bind(user_id)
            .bind(price)
            .bind(source.as_str())
            .fetch_one(conn)
            .await
    }

    /// Rule-issued coupons under `discount_id`, used or not. Gifts sharing
    /// the id do not count against the quota.
    pub async fn count_by_discount(
        conn: &mut PgConnection,
        discount_id: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM discount_coupons WHERE discount_id = $1 AND source = 'rule'",
        )
        .bind(discount_id)
        .fetch_one(conn)
        .await
    }

    /// Rule-issued counts for several discount ids at once. Ids without
    /// coupons are absent from the result.
    pub async fn count_grouped_by_discount(
        conn: &mut PgConnection,
        discount_ids: &[String],
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT discount_id, COUNT(*) FROM discount_coupons \
             WHERE discount_id = ANY($1) AND source = 'rule' GROUP BY discount_id",
        )
        .bind(discount_ids)
        .fetch_all(conn)
        .await
    }

    /// Whether `user_id` already received the rule coupon for `discount_id`.
    pub async fn rule_coupon_exists(
        conn: &mut PgConnection,
        user_id: DbId,
        discount_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM discount_coupons \
             WHERE user_id = $1 AND discount_id = $2 AND source = 'rule')",
        )
        .bind(user_id)
        .bind(discount_id)
        .fetch_one(conn)
        .await
    }

    /// Every coupon owned by `user_id`, newest first.
    pub async fn list_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<DiscountCoupon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discount_coupons WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, DiscountCoupon>(&query)
            .bind(user_id)
            .fetch_all(conn)
            .await
    }

    /// Outstanding coupons of `user_id`, without locking.
    pub async fn list_unused(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<DiscountCoupon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discount_coupons WHERE user_id = $1 AND used_at IS NULL ORDER BY id"
        );
        sqlx::query_as::<_, DiscountCoupon>(&query)
            .bind(user_id)
            .fetch_all(conn)
            .await
    }

    /// Outstanding coupons of `user_id`, row-locked until the transaction ends.
    pub async fn list_unused_for_update(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<DiscountCoupon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discount_coupons WHERE user_id = $1 AND used_at IS NULL \
             ORDER BY id FOR UPDATE"
        );
        sqlx::query_as::<_, DiscountCoupon>(&query)
            .bind(user_id)
            .fetch_all(conn)
            .await
    }

    /// Mark the given outstanding coupons as redeemed in one statement.
    ///
    /// Only `ids` are touched; coupons created after the caller locked its
    /// batch stay outstanding.
    pub async fn mark_used(
        conn: &mut PgConnection,
        ids: &[DbId],
        staff_id: DbId,
        history_id: DbId,
        used_at: Timestamp,
    ) -> Result<Vec<DiscountCoupon>, sqlx::Error> {
        let query = format!(
            "UPDATE discount_coupons SET used_by = $2, used_at = $3, history_id = $4 \
             WHERE id = ANY($1) AND used_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiscountCoupon>(&query)
            .bind(ids)
            .bind(staff_id)
            .bind(used_at)
            .bind(history_id)
            .fetch_all(conn)
            .await
    }
}
