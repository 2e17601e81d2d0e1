//! Integration tests for friendship formation and capacity gating.

mod common;

use assert_matches::assert_matches;
use common::{new_account, new_activity, reload, t0};
use quest_core::activity::ActivityType;
use quest_core::error::CoreError;
use quest_db::engine::friends::{add_friend, friend_stats};
use quest_db::engine::visits::check_in;
use quest_db::engine::EngineError;
use quest_db::repositories::FriendRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_friend_creates_both_edges_and_rewards(pool: PgPool) {
    let alice = new_account(&pool, "alice", 5).await;
    let bob = new_account(&pool, "bob", 5).await;

    let mut tx = pool.begin().await.unwrap();
    let outcome = add_friend(&mut tx, alice.id, bob.id, 3, t0()).await.unwrap();
    tx.commit().await.unwrap();

    assert!(outcome.inserted_forward && outcome.inserted_backward);
    assert!(outcome.rewarded_current && outcome.rewarded_target);

    let mut conn = pool.acquire().await.unwrap();
    assert!(FriendRepo::exists(&mut conn, alice.id, bob.id).await.unwrap());
    assert!(FriendRepo::exists(&mut conn, bob.id, alice.id).await.unwrap());
    assert_eq!(reload(&pool, alice.id).await.unlock_level, 6);
    assert_eq!(reload(&pool, bob.id).await.unlock_level, 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reverse_request_is_already_friends(pool: PgPool) {
    let alice = new_account(&pool, "alice", 5).await;
    let bob = new_account(&pool, "bob", 5).await;

    let mut tx = pool.begin().await.unwrap();
    add_friend(&mut tx, alice.id, bob.id, 3, t0()).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let err = add_friend(&mut tx, bob.id, alice.id, 3, t0()).await.unwrap_err();
    assert_matches!(err, EngineError::Rule(CoreError::AlreadyFriends));
    drop(tx);

    assert_eq!(reload(&pool, alice.id).await.unlock_level, 6);
    assert_eq!(reload(&pool, bob.id).await.unlock_level, 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_and_missing_target(pool: PgPool) {
    let alice = new_account(&pool, "alice", 5).await;

    let mut tx = pool.begin().await.unwrap();
    let err = add_friend(&mut tx, alice.id, alice.id, 3, t0()).await.unwrap_err();
    assert_matches!(err, EngineError::Rule(CoreError::SelfReference));

    let err = add_friend(&mut tx, alice.id, alice.id + 1000, 3, t0())
        .await
        .unwrap_err();
    assert_matches!(err, EngineError::Rule(CoreError::NotFound { entity: "Account", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_over_budget_side_gets_edge_without_bonus(pool: PgPool) {
    // Multiplier 1 with no visits: each account earns a bonus for one friend.
    let alice = new_account(&pool, "alice", 5).await;
    let bob = new_account(&pool, "bob", 5).await;
    let carol = new_account(&pool, "carol", 5).await;

    let mut tx = pool.begin().await.unwrap();
    add_friend(&mut tx, alice.id, bob.id, 1, t0()).await.unwrap();
    let outcome = add_friend(&mut tx, alice.id, carol.id, 1, t0()).await.unwrap();
    tx.commit().await.unwrap();

    assert!(outcome.inserted_forward && outcome.inserted_backward);
    assert!(!outcome.rewarded_current);
    assert!(outcome.rewarded_target);

    assert_eq!(reload(&pool, alice.id).await.unlock_level, 6);
    assert_eq!(reload(&pool, carol.id).await.unlock_level, 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_visits_raise_budget(pool: PgPool) {
    let alice = new_account(&pool, "alice", 5).await;
    let booth = new_activity(&pool, "Booth", ActivityType::Booth).await;

    let mut tx = pool.begin().await.unwrap();
    let before = friend_stats(&mut tx, alice.id, 3).await.unwrap();
    assert_eq!((before.count, before.max), (0, 3));

    check_in(&mut tx, alice.id, booth.id, t0()).await.unwrap();
    let after = friend_stats(&mut tx, alice.id, 3).await.unwrap();
    assert_eq!((after.count, after.max), (0, 6));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_crossed_requests_do_not_deadlock(pool: PgPool) {
    let alice = new_account(&pool, "alice", 5).await;
    let bob = new_account(&pool, "bob", 5).await;

    let spawn = |from: i64, to: i64| {
        let pool = pool.clone();
        tokio::spawn(async move {
            let mut tx = pool.begin().await.unwrap();
            let result = add_friend(&mut tx, from, to, 3, t0()).await;
            if result.is_ok() {
                tx.commit().await.unwrap();
            }
            result.is_ok()
        })
    };

    let (a, b) = tokio::join!(spawn(alice.id, bob.id), spawn(bob.id, alice.id));
    let successes = [a.unwrap(), b.unwrap()].iter().filter(|ok| **ok).count();

    assert_eq!(successes, 1);
    assert_eq!(reload(&pool, alice.id).await.unlock_level, 6);
    assert_eq!(reload(&pool, bob.id).await.unlock_level, 6);
}
