use crate::types::DbId;

/// Domain error kinds shared by the engine and the HTTP layer.
///
/// The business-rule variants are expected outcomes and terminal for the
/// request. Storage failures are not represented here; they travel as
/// `sqlx::Error` next to this type.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} with key {key}")]
    NotFoundByKey { entity: &'static str, key: String },

    #[error("Cannot befriend yourself")]
    SelfReference,

    #[error("Already friends")]
    AlreadyFriends,

    #[error("Level {next_level} exceeds unlock level {unlock_level}")]
    LevelExceedsUnlock { next_level: i32, unlock_level: i32 },

    #[error("Submission too fast: {elapsed_ms}ms elapsed, {required_ms}ms required")]
    SubmissionTooFast { required_ms: i64, elapsed_ms: i64 },

    #[error("No available coupons")]
    NoAvailableCoupons,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Stable machine-readable reason string for clients and tests.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } | CoreError::NotFoundByKey { .. } => "NOT_FOUND",
            CoreError::SelfReference => "SELF_REFERENCE",
            CoreError::AlreadyFriends => "ALREADY_FRIENDS",
            CoreError::LevelExceedsUnlock { .. } => "LEVEL_EXCEEDS_UNLOCK",
            CoreError::SubmissionTooFast { .. } => "SUBMISSION_TOO_FAST",
            CoreError::NoAvailableCoupons => "NO_AVAILABLE_COUPONS",
            CoreError::InvalidToken(_) => "INVALID_TOKEN",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Unauthorized(_) => "UNAUTHORIZED",
            CoreError::Forbidden(_) => "FORBIDDEN",
            CoreError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether the failure is the caller's fault (4xx class) rather than ours.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CoreError::Configuration(_))
    }
}
