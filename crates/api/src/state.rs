use std::sync::Arc;

use quest_core::clock::Clock;
use quest_core::game_config::GameConfig;
use quest_core::identity::IdentityProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: quest_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Levels, discount rules and sheet music. Immutable after start-up.
    pub game: Arc<GameConfig>,
    /// Source of "now" for pacing checks and redemption timestamps.
    pub clock: Arc<dyn Clock>,
    /// Resolves external tokens when an attendee logs in for the first time.
    pub identity: Arc<dyn IdentityProvider>,
}
