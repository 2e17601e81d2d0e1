//! Repository for the `activities` table.

use quest_core::types::DbId;
use sqlx::PgConnection;

use crate::models::activity::{Activity, ActivityWithVisit, CreateActivity};

const COLUMNS: &str = "id, token, activity_type, qrcode_token, name, created_at, updated_at";

pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (token, activity_type, qrcode_token, name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.token)
            .bind(input.activity_type.as_str())
            .bind(&input.qrcode_token)
            .bind(&input.name)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Look up by the public QR code attendees scan.
    pub async fn find_by_qrcode_token(
        conn: &mut PgConnection,
        qrcode_token: &str,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE qrcode_token = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(qrcode_token)
            .fetch_optional(conn)
            .await
    }

    /// Look up by the secret login token handed to booth operators.
    pub async fn find_by_token(
        conn: &mut PgConnection,
        token: &str,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE token = $1");
        sqlx::query_as::<_, Activity>(&query)
            .bind(token)
            .fetch_optional(conn)
            .await
    }

    /// All activities, flagged with whether `user_id` has visited each one.
    pub async fn list_with_visits(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<ActivityWithVisit>, sqlx::Error> {
        sqlx::query_as::<_, ActivityWithVisit>(
            "SELECT a.id, a.activity_type, a.name, (v.user_id IS NOT NULL) AS visited \
             FROM activities a \
             LEFT JOIN visits v ON v.activity_id = a.id AND v.user_id = $1 \
             ORDER BY a.id",
        )
        .bind(user_id)
        .fetch_all(conn)
        .await
    }
}
