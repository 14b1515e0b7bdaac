//! `SQLite` implementation of the `ActivityRepository` trait.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use insightplace_core::{ActivityFilter, ActivityLog, ActivityRepository, RepositoryError};

use super::row_mappers::{
    ACTIVITY_COLUMNS, format_datetime, map_sqlx_error, row_to_activity, to_json,
};

pub struct SqliteActivityRepository {
    pool: SqlitePool,
}

impl SqliteActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepository {
    async fn insert(&self, entry: &ActivityLog) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO activity_logs (id, user_id, user_email, activity_type, description,
                                        ip_address, user_agent, metadata, timestamp)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.user_email)
        .bind(entry.activity_type.as_str())
        .bind(&entry.description)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .bind(to_json(&entry.metadata)?)
        .bind(format_datetime(&entry.timestamp))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityLog>, RepositoryError> {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activity_logs WHERE 1 = 1"
        ));
        if let Some(ref user_id) = filter.user_id {
            builder.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(ref activity_type) = filter.activity_type {
            builder.push(" AND activity_type = ").push_bind(activity_type);
        }
        builder
            .push(" ORDER BY timestamp DESC LIMIT ")
            .push_bind(i64::from(filter.limit));

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        rows.iter().map(row_to_activity).collect()
    }

    #[allow(clippy::cast_sign_loss)]
    async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count as u64)
    }
}
