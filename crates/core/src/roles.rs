//! Well-known principal role names carried in session tokens.

/// An attendee playing the game.
pub const ROLE_PLAYER: &str = "player";

/// A booth operator session, established with the activity's login token.
pub const ROLE_BOOTH: &str = "booth";

/// A redemption-counter operator.
pub const ROLE_STAFF: &str = "staff";
