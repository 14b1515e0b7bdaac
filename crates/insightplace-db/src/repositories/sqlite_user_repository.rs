//! `SQLite` implementation of the `UserRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use insightplace_core::{RepositoryError, User, UserRepository};

use super::row_mappers::{USER_COLUMNS, format_datetime, map_sqlx_error, row_to_user};

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> Result<Option<User>, RepositoryError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?");
        sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .as_ref()
            .map(row_to_user)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, email, full_name, company_id, role, active, hashed_password,
                                last_login, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.company_id)
        .bind(user.role.as_str())
        .bind(user.active)
        .bind(&user.hashed_password)
        .bind(user.last_login.as_ref().map(format_datetime))
        .bind(format_datetime(&user.created_at))
        .bind(format_datetime(&user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        self.fetch_one_by("id", id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.fetch_one_by("email", email).await
    }

    async fn list(&self, company_id: Option<&str>) -> Result<Vec<User>, RepositoryError> {
        let rows = match company_id {
            Some(company_id) => {
                let query = format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE company_id = ? ORDER BY created_at"
                );
                sqlx::query(&query)
                    .bind(company_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at");
                sqlx::query(&query).fetch_all(&self.pool).await
            }
        }
        .map_err(map_sqlx_error)?;
        rows.iter().map(row_to_user).collect()
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET email = ?, full_name = ?, role = ?, active = ?,
                              hashed_password = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.active)
        .bind(&user.hashed_password)
        .bind(format_datetime(&user.updated_at))
        .bind(&user.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User with ID {}", user.id)));
        }
        Ok(())
    }

    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(format_datetime(&at))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User with ID {id}")));
        }
        Ok(())
    }

    #[allow(clippy::cast_sign_loss)]
    async fn count_active(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE active = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count as u64)
    }
}
