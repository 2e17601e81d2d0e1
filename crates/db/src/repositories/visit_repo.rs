//! Repository for the `visits` table.

use quest_core::types::DbId;
use sqlx::PgConnection;

pub struct VisitRepo;

impl VisitRepo {
    /// Insert the (user, activity) pair if absent. Returns `true` only when
    /// this call created the row.
    pub async fn insert_if_absent(
        conn: &mut PgConnection,
        user_id: DbId,
        activity_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO visits (user_id, activity_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, activity_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(activity_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_user(conn: &mut PgConnection, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(conn)
            .await
    }

    pub async fn count_by_activity(
        conn: &mut PgConnection,
        activity_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE activity_id = $1")
            .bind(activity_id)
            .fetch_one(conn)
            .await
    }
}
