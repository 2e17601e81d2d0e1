//! Dense-rank queries over `accounts`.

use quest_core::types::DbId;
use sqlx::PgConnection;

use crate::models::leaderboard::RankedAccount;

/// Ranked view shared by every query below.
const RANKED: &str = "SELECT DENSE_RANK() OVER (ORDER BY current_level DESC, last_pass_time ASC) AS rank, \
        id AS user_id, nickname, current_level, last_pass_time \
    FROM accounts";

pub struct RankRepo;

impl RankRepo {
    /// One page of the board, ordered by rank then id.
    pub async fn page(
        conn: &mut PgConnection,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RankedAccount>, sqlx::Error> {
        let query = format!(
            "SELECT rank, user_id, nickname, current_level, last_pass_time FROM ({RANKED}) r \
             ORDER BY rank, user_id LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, RankedAccount>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(conn)
            .await
    }

    /// The ranked entry of one account.
    pub async fn find_for_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<RankedAccount>, sqlx::Error> {
        let query = format!(
            "SELECT rank, user_id, nickname, current_level, last_pass_time FROM ({RANKED}) r \
             WHERE user_id = $1"
        );
        sqlx::query_as::<_, RankedAccount>(&query)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Every entry whose rank lies in `[from_rank, to_rank]`.
    pub async fn rank_range(
        conn: &mut PgConnection,
        from_rank: i64,
        to_rank: i64,
    ) -> Result<Vec<RankedAccount>, sqlx::Error> {
        let query = format!(
            "SELECT rank, user_id, nickname, current_level, last_pass_time FROM ({RANKED}) r \
             WHERE rank BETWEEN $1 AND $2 ORDER BY rank, user_id"
        );
        sqlx::query_as::<_, RankedAccount>(&query)
            .bind(from_rank)
            .bind(to_rank)
            .fetch_all(conn)
            .await
    }
}
