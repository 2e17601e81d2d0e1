use axum::routing::{get, post};
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// The static `/booth/...` segments take precedence over `/{activity_qr}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(activities::list))
        .route("/{activity_qr}", post(activities::check_in_by_qrcode))
        .route("/booth/session", post(activities::booth_login))
        .route("/booth/count", get(activities::booth_count))
        .route("/booth/{user_qr}", post(activities::booth_check_in))
}
