//! Reward bookkeeping that does not need the database.

use serde::{Deserialize, Serialize};

use crate::game_config::DiscountRule;

/// Where a coupon came from. Only rule coupons count against a rule's quota
/// and its once-per-user limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponSource {
    Rule,
    Gift,
}

impl CouponSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CouponSource::Rule => "rule",
            CouponSource::Gift => "gift",
        }
    }
}

/// A discount rule together with how much of its quota is used.
#[derive(Debug, Clone, Serialize)]
pub struct RuleStatus {
    pub id: String,
    pub pass_level: i32,
    pub amount: i32,
    pub max_qty: i64,
    pub issued_qty: i64,
    pub description: String,
    pub is_max_qty_reached: bool,
}

impl RuleStatus {
    pub fn new(rule: &DiscountRule, issued_qty: i64) -> Self {
        Self {
            id: rule.id.clone(),
            pass_level: rule.pass_level,
            amount: rule.amount,
            max_qty: rule.max_qty,
            issued_qty,
            description: rule.description.clone(),
            is_max_qty_reached: quota_reached(rule, issued_qty),
        }
    }
}

/// Rules whose threshold is at or below `level`, in configuration order.
pub fn rules_crossed(rules: &[DiscountRule], level: i32) -> impl Iterator<Item = &DiscountRule> {
    rules.iter().filter(move |rule| rule.pass_level <= level)
}

/// Whether a rule has no quota left.
pub fn quota_reached(rule: &DiscountRule, issued_qty: i64) -> bool {
    issued_qty >= rule.max_qty
}

/// Sum of coupon prices; `i64` so large batches cannot overflow.
pub fn batch_total<I>(prices: I) -> i64
where
    I: IntoIterator<Item = i32>,
{
    prices.into_iter().map(i64::from).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(max_qty: i64) -> DiscountRule {
        DiscountRule {
            id: "level-10".into(),
            pass_level: 10,
            amount: 100,
            max_qty,
            description: "Clear level 10".into(),
        }
    }

    fn at(id: &str, pass_level: i32) -> DiscountRule {
        DiscountRule {
            id: id.into(),
            pass_level,
            amount: 10,
            max_qty: 1,
            description: String::new(),
        }
    }

    #[test]
    fn test_rules_crossed_keeps_order() {
        let rules = [at("level-5", 5), at("level-1", 1)];

        let ids: Vec<_> = rules_crossed(&rules, 5).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["level-5", "level-1"]);

        let ids: Vec<_> = rules_crossed(&rules, 4).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["level-1"]);

        assert_eq!(rules_crossed(&rules, 0).count(), 0);
    }

    #[test]
    fn test_quota_reached() {
        assert!(!quota_reached(&rule(2), 1));
        assert!(quota_reached(&rule(2), 2));
        assert!(quota_reached(&rule(2), 3));
    }

    #[test]
    fn test_rule_status() {
        let status = RuleStatus::new(&rule(1), 1);
        assert_eq!(status.id, "level-10");
        assert!(status.is_max_qty_reached);
    }

    #[test]
    fn test_batch_total() {
        assert_eq!(batch_total([50, 100, 200]), 350);
        assert_eq!(batch_total(Vec::<i32>::new()), 0);
        assert_eq!(batch_total([i32::MAX, i32::MAX]), 2 * i64::from(i32::MAX));
    }
}
