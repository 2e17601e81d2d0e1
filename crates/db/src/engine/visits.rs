//! Idempotent visit recording.

use quest_core::error::CoreError;
use quest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::PgConnection;

use crate::repositories::{AccountRepo, VisitRepo};

use super::EngineResult;

/// Result of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInOutcome {
    /// Whether this call recorded the visit (and granted the bonus).
    pub first_visit: bool,
    /// The account's unlock level after the check-in.
    pub unlock_level: i32,
}

/// Record that `user_id` visited `activity_id`. `true` only for the call that
/// created the row; repeats and concurrent duplicates see `false`.
#[tracing::instrument(skip(conn))]
pub async fn record_visit(
    conn: &mut PgConnection,
    user_id: DbId,
    activity_id: DbId,
) -> EngineResult<bool> {
    Ok(VisitRepo::insert_if_absent(conn, user_id, activity_id).await?)
}

/// Record the visit and, on the first visit only, raise the unlock level by one.
#[tracing::instrument(skip(conn))]
pub async fn check_in(
    conn: &mut PgConnection,
    user_id: DbId,
    activity_id: DbId,
    now: Timestamp,
) -> EngineResult<CheckInOutcome> {
    let first_visit = record_visit(&mut *conn, user_id, activity_id).await?;

    let unlock_level = if first_visit {
        AccountRepo::increment_unlock_level(&mut *conn, user_id, now).await?
    } else {
        AccountRepo::find_by_id(&mut *conn, user_id)
            .await?
            .map(|a| a.unlock_level)
    }
    .ok_or(CoreError::NotFound {
        entity: "Account",
        id: user_id,
    })?;

    tracing::debug!(first_visit, unlock_level, "Check-in recorded");
    Ok(CheckInOutcome {
        first_visit,
        unlock_level,
    })
}
