//! Attendee account model.

use quest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `accounts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    /// External identity token. Never serialized.
    #[serde(skip_serializing)]
    pub auth_token: String,
    pub nickname: String,
    pub qrcode_token: String,
    pub coupon_token: String,
    pub unlock_level: i32,
    pub current_level: i32,
    pub last_pass_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an account after the identity provider vouched for it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccount {
    pub auth_token: String,
    pub nickname: String,
    pub qrcode_token: String,
    pub coupon_token: String,
    pub unlock_level: i32,
    pub last_pass_time: Timestamp,
}
