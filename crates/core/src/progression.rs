//! Level pacing rules.
//!
//! A level is a song of `notes` notes at `speed` beats per minute; nobody can
//! legitimately finish it faster than `notes * 60 / speed` seconds after the
//! previous level was passed.

use chrono::Duration;

use crate::error::CoreError;
use crate::game_config::LevelSpec;
use crate::types::Timestamp;

const NANOS_PER_MINUTE: i64 = 60_000_000_000;

/// Minimum time a level takes to play, truncated to whole nanoseconds.
pub fn required_duration(level: &LevelSpec) -> Duration {
    if level.speed <= 0 {
        return Duration::zero();
    }
    let nanos = i64::from(level.notes).saturating_mul(NANOS_PER_MINUTE) / i64::from(level.speed);
    Duration::nanoseconds(nanos)
}

/// The level a submission would advance to, if the unlock ceiling allows it.
pub fn next_level(current_level: i32, unlock_level: i32) -> Result<i32, CoreError> {
    let next = current_level + 1;
    if next > unlock_level {
        return Err(CoreError::LevelExceedsUnlock {
            next_level: next,
            unlock_level,
        });
    }
    Ok(next)
}

/// Reject a submission that arrives before the level could have been played.
pub fn check_pacing(
    level: &LevelSpec,
    last_pass_time: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    let required = required_duration(level);
    let elapsed = now - last_pass_time;
    if elapsed < required {
        return Err(CoreError::SubmissionTooFast {
            required_ms: required.num_milliseconds(),
            elapsed_ms: elapsed.num_milliseconds(),
        });
    }
    Ok(())
}
