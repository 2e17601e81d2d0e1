//! Repository for the `accounts` table.

use quest_core::types::{DbId, Timestamp};
use sqlx::PgConnection;

use crate::models::account::{Account, CreateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, auth_token, nickname, qrcode_token, coupon_token, \
    unlock_level, current_level, last_pass_time, created_at, updated_at";

/// Provides lookups and level mutations for attendee accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account. When another request created the account for the
    /// same auth token first, that row is returned instead.
    pub async fn create_or_get(
        conn: &mut PgConnection,
        input: &CreateAccount,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (auth_token, nickname, qrcode_token, coupon_token, \
                unlock_level, current_level, last_pass_time)
             VALUES ($1, $2, $3, $4, $5, 0, $6)
             ON CONFLICT (auth_token) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Account>(&query)
            .bind(&input.auth_token)
            .bind(&input.nickname)
            .bind(&input.qrcode_token)
            .bind(&input.coupon_token)
            .bind(input.unlock_level)
            .bind(input.last_pass_time)
            .fetch_optional(&mut *conn)
            .await?;

        match inserted {
            Some(account) => Ok(account),
            None => Self::find_by_auth_token(conn, &input.auth_token)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lock the account row until the surrounding transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_auth_token(
        conn: &mut PgConnection,
        auth_token: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE auth_token = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(auth_token)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_qrcode_token(
        conn: &mut PgConnection,
        qrcode_token: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE qrcode_token = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(qrcode_token)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_coupon_token(
        conn: &mut PgConnection,
        coupon_token: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE coupon_token = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(coupon_token)
            .fetch_optional(conn)
            .await
    }

    /// Raise the unlock ceiling by one. Returns the new ceiling, or `None`
    /// when the account does not exist.
    pub async fn increment_unlock_level(
        conn: &mut PgConnection,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE accounts SET unlock_level = unlock_level + 1, updated_at = $2 \
             WHERE id = $1 RETURNING unlock_level",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(conn)
        .await
    }

    /// Record a passed level. The caller holds the row lock and has already
    /// validated `level` against the unlock ceiling and pacing rule.
    pub async fn record_level_pass(
        conn: &mut PgConnection,
        id: DbId,
        level: i32,
        now: Timestamp,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET current_level = $2, last_pass_time = $3, updated_at = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(level)
            .bind(now)
            .fetch_one(conn)
            .await
    }
}
