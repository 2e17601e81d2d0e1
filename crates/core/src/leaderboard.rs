//! Leaderboard paging arithmetic.
//!
//! Ranking itself happens in SQL (`DENSE_RANK() OVER (ORDER BY current_level
//! DESC, last_pass_time ASC)`); this module only decides which slice to read.

use crate::error::CoreError;

/// Entries per leaderboard page.
pub const PAGE_SIZE: i64 = 30;

/// How many ranks above and below the caller the "around" view covers.
pub const AROUND_SPAN: i64 = 5;

/// `(limit, offset)` for a 1-indexed page.
pub fn page_window(page: i64) -> Result<(i64, i64), CoreError> {
    if page < 1 {
        return Err(CoreError::Validation(format!(
            "page must be at least 1, got {page}"
        )));
    }
    Ok((PAGE_SIZE, (page - 1) * PAGE_SIZE))
}

/// Inclusive dense-rank bounds of the "around me" view.
pub fn around_bounds(rank: i64) -> (i64, i64) {
    ((rank - AROUND_SPAN).max(1), rank + AROUND_SPAN)
}
