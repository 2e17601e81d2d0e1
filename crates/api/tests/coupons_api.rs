//! HTTP tests for gift coupons and the redemption counter.

mod common;

use axum::http::StatusCode;
use common::{expect_status, get_auth, login_player, post_auth, post_json, post_json_auth};
use quest_db::models::coupon_gift::CreateCouponGift;
use quest_db::models::staff::CreateStaff;
use quest_db::repositories::{CouponGiftRepo, StaffRepo};
use sqlx::PgPool;

async fn staff_session(app: &axum::Router, pool: &PgPool) -> String {
    let mut conn = pool.acquire().await.unwrap();
    StaffRepo::create(
        &mut conn,
        &CreateStaff {
            name: "counter-1".into(),
            token: "staff-secret".into(),
        },
    )
    .await
    .unwrap();

    let json = expect_status(
        post_json(
            app.clone(),
            "/api/v1/discount-coupons/staff/session",
            serde_json::json!({ "token": "staff-secret" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    json["data"]["access_token"].as_str().unwrap().to_string()
}

async fn seed_gift(pool: &PgPool, token: &str, price: i32) {
    let mut conn = pool.acquire().await.unwrap();
    CouponGiftRepo::create(
        &mut conn,
        &CreateCouponGift {
            token: token.to_string(),
            price,
            discount_id: "sponsor-gift".into(),
        },
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gift_then_redeem_once(pool: PgPool) {
    seed_gift(&pool, "gift-1", 80).await;
    seed_gift(&pool, "gift-2", 20).await;
    let app = common::build_test_app(pool.clone());
    let staff = staff_session(&app, &pool).await;
    let (alice, account) = login_player(&app, "alice").await;
    let coupon_token = account["coupon_token"].as_str().unwrap();

    for gift in ["gift-1", "gift-2"] {
        expect_status(
            post_json_auth(
                app.clone(),
                "/api/v1/discount-coupons/gifts",
                serde_json::json!({ "token": gift }),
                &alice,
            )
            .await,
            StatusCode::OK,
        )
        .await;
    }

    let preview = expect_status(
        get_auth(
            app.clone(),
            &format!("/api/v1/discount-coupons/staff/coupon-tokens/{coupon_token}"),
            &staff,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(preview["data"]["total"], 100);
    assert_eq!(preview["data"]["user_name"], "alice");

    let redeemed = expect_status(
        post_json_auth(
            app.clone(),
            "/api/v1/discount-coupons/staff/redemptions",
            serde_json::json!({ "coupon_token": coupon_token }),
            &staff,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(redeemed["data"]["total"], 100);
    assert_eq!(redeemed["data"]["count"], 2);
    assert_eq!(redeemed["data"]["user_id"], account["id"]);

    let again = expect_status(
        post_json_auth(
            app.clone(),
            "/api/v1/discount-coupons/staff/redemptions",
            serde_json::json!({ "coupon_token": coupon_token }),
            &staff,
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(again["code"], "NO_AVAILABLE_COUPONS");

    let history = expect_status(
        get_auth(
            app.clone(),
            "/api/v1/discount-coupons/staff/current/redemptions",
            &staff,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(history["data"].as_array().unwrap().len(), 1);
    assert_eq!(history["data"][0]["nickname"], "alice");

    let mine = expect_status(
        get_auth(app, "/api/v1/discount-coupons", &alice).await,
        StatusCode::OK,
    )
    .await;
    assert!(mine["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| !c["used_at"].is_null()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gift_token_is_single_use(pool: PgPool) {
    seed_gift(&pool, "gift-1", 80).await;
    let app = common::build_test_app(pool);
    let (alice, _) = login_player(&app, "alice").await;
    let (bob, _) = login_player(&app, "bob").await;

    let body = serde_json::json!({ "token": "gift-1" });
    expect_status(
        post_json_auth(app.clone(), "/api/v1/discount-coupons/gifts", body.clone(), &alice).await,
        StatusCode::OK,
    )
    .await;

    let response = post_json_auth(app, "/api/v1/discount-coupons/gifts", body, &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_coupon_token_and_rules(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff = staff_session(&app, &pool).await;

    let unknown = expect_status(
        post_json_auth(
            app.clone(),
            "/api/v1/discount-coupons/staff/redemptions",
            serde_json::json!({ "coupon_token": "nobody" }),
            &staff,
        )
        .await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(unknown["code"], "INVALID_TOKEN");

    let rules = expect_status(
        get_auth(app.clone(), "/api/v1/discount-coupons/staff/rules", &staff).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(rules["data"][0]["id"], "level-1");
    assert_eq!(rules["data"][0]["issued_qty"], 0);
    assert_eq!(rules["data"][0]["is_max_qty_reached"], false);

    let (player, _) = login_player(&app, "alice").await;
    let response = post_auth(app, "/api/v1/discount-coupons/staff/rules", &player).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
