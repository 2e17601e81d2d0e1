//! Repository for the `friends` edge table.

use quest_core::types::DbId;
use sqlx::PgConnection;

pub struct FriendRepo;

impl FriendRepo {
    /// Insert the directed edge `user_id -> friend_id`. Returns `true` when
    /// the edge did not exist before.
    pub async fn insert_edge(
        conn: &mut PgConnection,
        user_id: DbId,
        friend_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO friends (user_id, friend_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, friend_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of outgoing edges, i.e. friends of `user_id`.
    pub async fn count_by_user(conn: &mut PgConnection, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM friends WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(conn)
            .await
    }

    pub async fn exists(
        conn: &mut PgConnection,
        user_id: DbId,
        friend_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM friends WHERE user_id = $1 AND friend_id = $2)",
        )
        .bind(user_id)
        .bind(friend_id)
        .fetch_one(conn)
        .await
    }
}
