//! Ranked leaderboard rows.

use quest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One account with its dense rank.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RankedAccount {
    pub rank: i64,
    pub user_id: DbId,
    pub nickname: String,
    pub current_level: i32,
    pub last_pass_time: Timestamp,
}
