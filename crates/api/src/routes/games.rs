use axum::routing::{get, post};
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Routes mounted at `/games`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submissions", post(games::submit))
        .route("/leaderboards", get(games::leaderboards))
        .route("/levels/{level}", get(games::level_info))
}
