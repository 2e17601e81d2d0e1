//! Repository for the `staffs` table.

use quest_core::types::DbId;
use sqlx::PgConnection;

use crate::models::staff::{CreateStaff, Staff};

const COLUMNS: &str = "id, name, token, created_at, updated_at";

pub struct StaffRepo;

impl StaffRepo {
    pub async fn create(conn: &mut PgConnection, input: &CreateStaff) -> Result<Staff, sqlx::Error> {
        let query = format!(
            "INSERT INTO staffs (name, token) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(&input.name)
            .bind(&input.token)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staffs WHERE id = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn find_by_token(
        conn: &mut PgConnection,
        token: &str,
    ) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staffs WHERE token = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(token)
            .fetch_optional(conn)
            .await
    }
}
