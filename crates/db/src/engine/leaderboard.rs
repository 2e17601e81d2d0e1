//! Leaderboard views.

use quest_core::leaderboard::{around_bounds, page_window};
use quest_core::types::DbId;
use serde::Serialize;
use sqlx::PgConnection;

use crate::models::leaderboard::RankedAccount;
use crate::repositories::RankRepo;

use super::EngineResult;

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub page: i64,
    pub entries: Vec<RankedAccount>,
    pub around: Vec<RankedAccount>,
    pub me: Option<RankedAccount>,
}

/// Read the page, the neighbourhood of `user_id` and its own entry.
///
/// Run inside [`crate::begin_read_snapshot`] so all three views agree.
#[tracing::instrument(skip(conn))]
pub async fn leaderboard(
    conn: &mut PgConnection,
    user_id: Option<DbId>,
    page: i64,
) -> EngineResult<Leaderboard> {
    let (limit, offset) = page_window(page)?;
    let entries = RankRepo::page(&mut *conn, limit, offset).await?;

    let me = match user_id {
        Some(id) => RankRepo::find_for_user(&mut *conn, id).await?,
        None => None,
    };
    let around = match &me {
        Some(entry) => {
            let (from, to) = around_bounds(entry.rank);
            RankRepo::rank_range(&mut *conn, from, to).await?
        }
        None => Vec::new(),
    };

    Ok(Leaderboard {
        page,
        entries,
        around,
        me,
    })
}
