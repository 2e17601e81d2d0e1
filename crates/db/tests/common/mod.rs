//! Fixtures shared by the engine integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use quest_core::activity::ActivityType;
use quest_core::game_config::GameConfig;
use quest_core::tokens::generate_lookup_token;
use quest_db::models::account::{Account, CreateAccount};
use quest_db::models::activity::{Activity, CreateActivity};
use quest_db::models::staff::{CreateStaff, Staff};
use quest_db::repositories::{AccountRepo, ActivityRepo, StaffRepo};
use sqlx::PgPool;

/// A fixed, readable starting instant.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 7, 9, 0, 0).unwrap()
}

pub async fn new_account(pool: &PgPool, nickname: &str, unlock_level: i32) -> Account {
    let mut conn = pool.acquire().await.unwrap();
    AccountRepo::create_or_get(
        &mut conn,
        &CreateAccount {
            auth_token: generate_lookup_token(),
            nickname: nickname.to_string(),
            qrcode_token: generate_lookup_token(),
            coupon_token: generate_lookup_token(),
            unlock_level,
            last_pass_time: t0(),
        },
    )
    .await
    .unwrap()
}

pub async fn new_activity(pool: &PgPool, name: &str, activity_type: ActivityType) -> Activity {
    let mut conn = pool.acquire().await.unwrap();
    ActivityRepo::create(
        &mut conn,
        &CreateActivity {
            token: generate_lookup_token(),
            activity_type,
            qrcode_token: generate_lookup_token(),
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn new_staff(pool: &PgPool, name: &str) -> Staff {
    let mut conn = pool.acquire().await.unwrap();
    StaffRepo::create(
        &mut conn,
        &CreateStaff {
            name: name.to_string(),
            token: generate_lookup_token(),
        },
    )
    .await
    .unwrap()
}

pub async fn reload(pool: &PgPool, id: i64) -> Account {
    let mut conn = pool.acquire().await.unwrap();
    AccountRepo::find_by_id(&mut conn, id).await.unwrap().unwrap()
}

/// Three levels: 30 s, 30 s and 5 s minimum play time.
pub fn game_config() -> GameConfig {
    GameConfig::from_json(
        r#"{
            "levels": [
                {"level": 1, "speed": 60, "notes": 30},
                {"level": 2, "speed": 120, "notes": 60},
                {"level": 3, "speed": 60, "notes": 5}
            ],
            "discount_rules": [
                {"id": "level-1", "pass_level": 1, "amount": 50, "max_qty": 1},
                {"id": "level-2", "pass_level": 2, "amount": 100, "max_qty": 2}
            ]
        }"#,
    )
    .unwrap()
}
