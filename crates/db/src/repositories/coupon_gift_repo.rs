//! Repository for the `discount_coupon_gifts` table.

use sqlx::PgConnection;

use crate::models::coupon_gift::{CreateCouponGift, DiscountCouponGift};

const COLUMNS: &str = "id, token, price, discount_id, created_at";

pub struct CouponGiftRepo;

impl CouponGiftRepo {
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateCouponGift,
    ) -> Result<DiscountCouponGift, sqlx::Error> {
        let query = format!(
            "INSERT INTO discount_coupon_gifts (token, price, discount_id) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiscountCouponGift>(&query)
            .bind(&input.token)
            .bind(input.price)
            .bind(&input.discount_id)
            .fetch_one(conn)
            .await
    }

    /// Delete the gift and hand it back. Concurrent claims of the same token
    /// serialize on the row; only one sees `Some`.
    pub async fn take_by_token(
        conn: &mut PgConnection,
        token: &str,
    ) -> Result<Option<DiscountCouponGift>, sqlx::Error> {
        let query = format!("DELETE FROM discount_coupon_gifts WHERE token = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, DiscountCouponGift>(&query)
            .bind(token)
            .fetch_optional(conn)
            .await
    }
}
