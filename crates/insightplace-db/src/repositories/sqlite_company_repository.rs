//! `SQLite` implementation of the `CompanyRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use insightplace_core::{Company, CompanyRepository, RepositoryError};

use super::row_mappers::{COMPANY_COLUMNS, format_datetime, map_sqlx_error, row_to_company};

pub struct SqliteCompanyRepository {
    pool: SqlitePool,
}

impl SqliteCompanyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for SqliteCompanyRepository {
    async fn insert(&self, company: &Company) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO companies (id, name, description, active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.active)
        .bind(format_datetime(&company.created_at))
        .bind(format_datetime(&company.updated_at))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Company>, RepositoryError> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ?");
        sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .as_ref()
            .map(row_to_company)
            .transpose()
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE name = ?");
        sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .as_ref()
            .map(row_to_company)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Company>, RepositoryError> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        rows.iter().map(row_to_company).collect()
    }

    #[allow(clippy::cast_sign_loss)]
    async fn count_active(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies WHERE active = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_test_database;
    use insightplace_core::NewCompany;

    async fn repo() -> SqliteCompanyRepository {
        SqliteCompanyRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn insert_and_lookup() {
        let repo = repo().await;
        let acme = NewCompany::new("Acme", Some("Client".into())).into_company();
        repo.insert(&acme).await.unwrap();

        let by_id = repo.get_by_id(&acme.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Acme");
        assert_eq!(by_id.description.as_deref(), Some("Client"));
        assert!(repo.get_by_name("Acme").await.unwrap().is_some());
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_is_already_exists() {
        let repo = repo().await;
        repo.insert(&NewCompany::new("Acme", None).into_company())
            .await
            .unwrap();
        let err = repo
            .insert(&NewCompany::new("Acme", None).into_company())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn list_is_sorted_and_counts_active() {
        let repo = repo().await;
        let mut dormant = NewCompany::new("Zeta", None).into_company();
        dormant.active = false;
        repo.insert(&dormant).await.unwrap();
        repo.insert(&NewCompany::new("Acme", None).into_company())
            .await
            .unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Acme", "Zeta"]);
        assert_eq!(repo.count_active().await.unwrap(), 1);
    }
}
