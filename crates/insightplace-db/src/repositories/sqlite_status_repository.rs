//! `SQLite` implementation of the `StatusCheckRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use insightplace_core::{RepositoryError, StatusCheck, StatusCheckRepository};

use super::row_mappers::{format_datetime, map_sqlx_error, row_to_status_check};

pub struct SqliteStatusCheckRepository {
    pool: SqlitePool,
}

impl SqliteStatusCheckRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusCheckRepository for SqliteStatusCheckRepository {
    async fn insert(&self, check: &StatusCheck) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO status_checks (id, client_name, timestamp) VALUES (?, ?, ?)")
            .bind(&check.id)
            .bind(&check.client_name)
            .bind(format_datetime(&check.timestamp))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn list(&self, limit: u32) -> Result<Vec<StatusCheck>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, client_name, timestamp FROM status_checks ORDER BY timestamp, rowid LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        rows.iter().map(row_to_status_check).collect()
    }
}
