use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{coupons, staff};
use crate::state::AppState;

/// Routes mounted at `/discount-coupons`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(coupons::list_mine))
        .route("/gifts", post(coupons::claim))
        .route("/staff/session", post(staff::login))
        .route("/staff/coupon-tokens/{coupon_token}", get(staff::preview))
        .route("/staff/redemptions", post(staff::redeem))
        .route("/staff/current/redemptions", get(staff::history))
        .route("/staff/rules", get(staff::rules))
}
