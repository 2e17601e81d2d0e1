//! Quota-bounded coupon issuance.

use quest_core::game_config::DiscountRule;
use quest_core::rewards::{quota_reached, rules_crossed, RuleStatus};
use quest_core::types::DbId;
use sqlx::PgConnection;

use crate::models::coupon::DiscountCoupon;
use crate::repositories::CouponRepo;

use super::EngineResult;

/// Take the transaction-scoped advisory lock for `rule_id`. Released on
/// commit or rollback; different rules hash to different keys.
async fn lock_rule(conn: &mut PgConnection, rule_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(rule_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Issue one coupon per rule whose threshold `new_level` reaches, in rule
/// order. A rule is skipped when the user already received its coupon or its
/// quota is used up. Gift coupons sharing a rule id are ignored here. Returns the coupons minted by this call.
#[tracing::instrument(skip(conn, rules))]
pub async fn issue_if_eligible(
    conn: &mut PgConnection,
    rules: &[DiscountRule],
    user_id: DbId,
    new_level: i32,
) -> EngineResult<Vec<DiscountCoupon>> {
    let mut issued = Vec::new();

    for rule in rules_crossed(rules, new_level) {
        lock_rule(&mut *conn, &rule.id).await?;

        if CouponRepo::rule_coupon_exists(&mut *conn, user_id, &rule.id).await? {
            continue;
        }

        let count = CouponRepo::count_by_discount(&mut *conn, &rule.id).await?;
        if quota_reached(rule, count) {
            tracing::debug!(rule = %rule.id, count, "Quota exhausted");
            continue;
        }

        let coupon = CouponRepo::create(&mut *conn, &rule.id, user_id, rule.amount).await?;
        tracing::info!(rule = %rule.id, coupon_id = coupon.id, "Coupon issued");
        issued.push(coupon);
    }

    Ok(issued)
}

/// Every rule with its current issued count (gifts excluded).
#[tracing::instrument(skip(conn, rules))]
pub async fn rule_statuses(
    conn: &mut PgConnection,
    rules: &[DiscountRule],
) -> EngineResult<Vec<RuleStatus>> {
    let ids: Vec<String> = rules.iter().map(|r| r.id.clone()).collect();
    let counts = CouponRepo::count_grouped_by_discount(conn, &ids).await?;

    Ok(rules
        .iter()
        .map(|rule| {
            let issued = counts
                .iter()
                .find(|(id, _)| *id == rule.id)
                .map_or(0, |(_, n)| *n);
            RuleStatus::new(rule, issued)
        })
        .collect())
}
