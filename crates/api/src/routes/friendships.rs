use axum::routing::{get, post};
use axum::Router;

use crate::handlers::friends;
use crate::state::AppState;

/// Routes mounted at `/friendships`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(friends::add))
        .route("/stats", get(friends::stats))
}
