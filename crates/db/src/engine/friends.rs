//! Mutual friendship formation with capacity-gated bonuses.

use quest_core::error::CoreError;
use quest_core::friendship::{can_unlock, capacity_budget};
use quest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::PgConnection;

use crate::repositories::{AccountRepo, FriendRepo, VisitRepo};

use super::EngineResult;

/// What `add_friend` changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FriendshipOutcome {
    pub inserted_forward: bool,
    pub inserted_backward: bool,
    pub rewarded_current: bool,
    pub rewarded_target: bool,
}

/// Friend count and bonus budget of one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FriendStats {
    pub count: i64,
    pub max: i64,
}

/// Whether `user_id` still earns a bonus for a new friend. Must run after the
/// account row is locked so the count cannot move underneath us.
async fn eligible(conn: &mut PgConnection, user_id: DbId, multiplier: i64) -> EngineResult<bool> {
    let visited = VisitRepo::count_by_user(&mut *conn, user_id).await?;
    let friends = FriendRepo::count_by_user(&mut *conn, user_id).await?;
    Ok(can_unlock(friends, visited, multiplier))
}

/// Befriend `current_user_id` and `target_user_id`.
///
/// Both account rows are locked in ascending id order, so A->B racing B->A
/// cannot deadlock. A side over its capacity budget still gets the edge but
/// no unlock bonus.
#[tracing::instrument(skip(conn))]
pub async fn add_friend(
    conn: &mut PgConnection,
    current_user_id: DbId,
    target_user_id: DbId,
    capacity_multiplier: i64,
    now: Timestamp,
) -> EngineResult<FriendshipOutcome> {
    if current_user_id == target_user_id {
        return Err(CoreError::SelfReference.into());
    }

    let (first, second) = if current_user_id < target_user_id {
        (current_user_id, target_user_id)
    } else {
        (target_user_id, current_user_id)
    };
    for id in [first, second] {
        if AccountRepo::find_by_id_for_update(&mut *conn, id)
            .await?
            .is_none()
        {
            return Err(CoreError::NotFound {
                entity: "Account",
                id,
            }
            .into());
        }
    }

    let current_eligible = eligible(&mut *conn, current_user_id, capacity_multiplier).await?;
    let target_eligible = eligible(&mut *conn, target_user_id, capacity_multiplier).await?;

    let inserted_forward = FriendRepo::insert_edge(&mut *conn, current_user_id, target_user_id).await?;
    let inserted_backward =
        FriendRepo::insert_edge(&mut *conn, target_user_id, current_user_id).await?;

    if !inserted_forward && !inserted_backward {
        return Err(CoreError::AlreadyFriends.into());
    }

    let rewarded_current = inserted_forward && current_eligible;
    if rewarded_current {
        AccountRepo::increment_unlock_level(&mut *conn, current_user_id, now).await?;
    }
    let rewarded_target = inserted_backward && target_eligible;
    if rewarded_target {
        AccountRepo::increment_unlock_level(&mut *conn, target_user_id, now).await?;
    }

    tracing::debug!(rewarded_current, rewarded_target, "Friendship formed");
    Ok(FriendshipOutcome {
        inserted_forward,
        inserted_backward,
        rewarded_current,
        rewarded_target,
    })
}

/// Current friend count and capacity budget of `user_id`.
#[tracing::instrument(skip(conn))]
pub async fn friend_stats(
    conn: &mut PgConnection,
    user_id: DbId,
    capacity_multiplier: i64,
) -> EngineResult<FriendStats> {
    let visited = VisitRepo::count_by_user(&mut *conn, user_id).await?;
    let count = FriendRepo::count_by_user(&mut *conn, user_id).await?;
    Ok(FriendStats {
        count,
        max: capacity_budget(visited, capacity_multiplier),
    })
}
