//! Transactional game operations.
//!
//! Every function takes the caller's open transaction as `&mut PgConnection`
//! (pass `&mut *tx`) and never commits. The caller commits on `Ok`; dropping
//! the transaction on `Err` (or on a cancelled request) rolls everything back,
//! so a failed operation leaves no partial effect.

use quest_core::error::CoreError;

pub mod accounts;
pub mod friends;
pub mod leaderboard;
pub mod progression;
pub mod redemption;
pub mod rewards;
pub mod visits;

/// Failure of an engine operation: a business-rule outcome or a storage fault.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Rule(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
