pub mod activities;
pub mod coupons;
pub mod friendships;
pub mod games;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/session                                   attendee login (public)
/// /users/me                                        own account (player)
///
/// /activities                                      list with visited flags (player)
/// /activities/{activity_qr}                        attendee check-in (player, POST)
/// /activities/booth/session                        booth login (public, POST)
/// /activities/booth/{user_qr}                      booth check-in (booth, POST)
/// /activities/booth/count                          visit count (booth)
///
/// /friendships                                     add friend by QR code (player, POST)
/// /friendships/stats                               {count, max} (player)
///
/// /games/submissions                               pass next level (player, POST)
/// /games/leaderboards                              ?page=N (player)
/// /games/levels/{level}                            level info, `current` allowed (player)
///
/// /discount-coupons                                own coupons (player)
/// /discount-coupons/gifts                          claim gift coupon (player, POST)
/// /discount-coupons/staff/session                  staff login (public, POST)
/// /discount-coupons/staff/coupon-tokens/{token}    preview (staff)
/// /discount-coupons/staff/redemptions              redeem batch (staff, POST)
/// /discount-coupons/staff/current/redemptions      own redemption history (staff)
/// /discount-coupons/staff/rules                    rule quota status (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/activities", activities::router())
        .nest("/friendships", friendships::router())
        .nest("/games", games::router())
        .nest("/discount-coupons", coupons::router())
}
