//! Friend capacity budget.
//!
//! Every account may collect friend bonuses up to a budget that grows with the
//! number of activities it visited. Going over budget still forms the
//! friendship, it just stops paying out.

/// `(visited + 1) * multiplier`.
pub fn capacity_budget(visited_count: i64, multiplier: i64) -> i64 {
    (visited_count + 1).saturating_mul(multiplier)
}

/// Whether a new friendship for this account still earns a bonus.
pub fn can_unlock(friend_count: i64, visited_count: i64, multiplier: i64) -> bool {
    friend_count < capacity_budget(visited_count, multiplier)
}
