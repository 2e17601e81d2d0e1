//! Level submission: unlock ceiling and pacing anti-cheat.

use quest_core::error::CoreError;
use quest_core::game_config::GameConfig;
use quest_core::progression::{check_pacing, next_level};
use quest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::PgConnection;

use crate::repositories::AccountRepo;

use super::EngineResult;

/// The account's progress after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelAdvance {
    pub user_id: DbId,
    pub current_level: i32,
    pub unlock_level: i32,
    pub last_pass_time: Timestamp,
}

/// Advance `user_id` by exactly one level.
///
/// The account row stays locked until the caller's transaction ends, so
/// concurrent submissions for the same account run one after another and
/// the second one is measured against the first one's `last_pass_time`.
#[tracing::instrument(skip(conn, config))]
pub async fn submit_level(
    conn: &mut PgConnection,
    config: &GameConfig,
    user_id: DbId,
    now: Timestamp,
) -> EngineResult<LevelAdvance> {
    let account = AccountRepo::find_by_id_for_update(&mut *conn, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Account",
            id: user_id,
        })?;

    let next = next_level(account.current_level, account.unlock_level)?;
    let level = config.level(next).ok_or_else(|| {
        CoreError::Configuration(format!("level {next} is not configured"))
    })?;
    check_pacing(level, account.last_pass_time, now)?;

    let updated = AccountRepo::record_level_pass(&mut *conn, user_id, next, now).await?;
    tracing::info!(level = next, "Level passed");

    Ok(LevelAdvance {
        user_id,
        current_level: updated.current_level,
        unlock_level: updated.unlock_level,
        last_pass_time: updated.last_pass_time,
    })
}
