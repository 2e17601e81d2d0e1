//! Activity model.

use quest_core::activity::ActivityType;
use quest_core::error::CoreError;
use quest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    /// Secret booth login token.
    #[serde(skip_serializing)]
    pub token: String,
    pub activity_type: String,
    #[serde(skip_serializing)]
    pub qrcode_token: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Activity {
    pub fn kind(&self) -> Result<ActivityType, CoreError> {
        self.activity_type.parse()
    }
}

/// Activity listing entry with the caller's visit flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityWithVisit {
    pub id: DbId,
    pub activity_type: String,
    pub name: String,
    pub visited: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub token: String,
    pub activity_type: ActivityType,
    pub qrcode_token: String,
    pub name: String,
}
