//! Account creation for identities the provider has already vouched for.

use quest_core::tokens::generate_lookup_token;
use quest_core::types::Timestamp;
use sqlx::PgConnection;

use crate::models::account::{Account, CreateAccount};
use crate::repositories::AccountRepo;

use super::EngineResult;

/// Create the account bound to `auth_token`, or return the existing one.
///
/// New accounts start at level 0 with `initial_unlock_level` unlocked, and
/// their pacing clock starts at `now`.
#[tracing::instrument(skip(conn, auth_token))]
pub async fn open_account(
    conn: &mut PgConnection,
    auth_token: &str,
    nickname: &str,
    initial_unlock_level: i32,
    now: Timestamp,
) -> EngineResult<Account> {
    let input = CreateAccount {
        auth_token: auth_token.to_string(),
        nickname: nickname.to_string(),
        qrcode_token: generate_lookup_token(),
        coupon_token: generate_lookup_token(),
        unlock_level: initial_unlock_level,
        last_pass_time: now,
    };
    let account = AccountRepo::create_or_get(conn, &input).await?;
    tracing::info!(user_id = account.id, "Account ready");
    Ok(account)
}
