//! `SQLite` implementation of the `ReportRepository` trait.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use insightplace_core::{Report, ReportRepository, ReportStatus, RepositoryError};

use super::row_mappers::{REPORT_COLUMNS, format_datetime, map_sqlx_error, row_to_report, to_json};

pub struct SqliteReportRepository {
    pool: SqlitePool,
}

impl SqliteReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Bump one of the counter columns.
    async fn increment(&self, column: &str, id: &str) -> Result<(), RepositoryError> {
        let query = format!("UPDATE reports SET {column} = {column} + 1 WHERE id = ?");
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Report with ID {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for SqliteReportRepository {
    #[allow(clippy::cast_possible_wrap)]
    async fn insert(&self, report: &Report) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO reports (id, title, description, company_id, status, tags, main_file,
                                  supporting_files, file_size, download_count, view_count,
                                  allow_download, uploaded_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&report.id)
        .bind(&report.title)
        .bind(&report.description)
        .bind(&report.company_id)
        .bind(report.status.as_str())
        .bind(to_json(&report.tags)?)
        .bind(&report.main_file)
        .bind(to_json(&report.supporting_files)?)
        .bind(report.file_size as i64)
        .bind(report.download_count as i64)
        .bind(report.view_count as i64)
        .bind(report.allow_download)
        .bind(&report.uploaded_by)
        .bind(format_datetime(&report.created_at))
        .bind(format_datetime(&report.updated_at))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Report>, RepositoryError> {
        let query = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?");
        sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .as_ref()
            .map(row_to_report)
            .transpose()
    }

    async fn list(
        &self,
        company_id: Option<&str>,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>, RepositoryError> {
        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {REPORT_COLUMNS} FROM reports WHERE 1 = 1"));
        if let Some(company_id) = company_id {
            builder.push(" AND company_id = ").push_bind(company_id);
        }
        if let Some(status) = status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        rows.iter().map(row_to_report).collect()
    }

    async fn update(&self, report: &Report) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE reports SET title = ?, description = ?, status = ?, tags = ?,
                                allow_download = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&report.title)
        .bind(&report.description)
        .bind(report.status.as_str())
        .bind(to_json(&report.tags)?)
        .bind(report.allow_download)
        .bind(format_datetime(&report.updated_at))
        .bind(&report.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Report with ID {}",
                report.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Report with ID {id}")));
        }
        Ok(())
    }

    async fn increment_views(&self, id: &str) -> Result<(), RepositoryError> {
        self.increment("view_count", id).await
    }

    async fn increment_downloads(&self, id: &str) -> Result<(), RepositoryError> {
        self.increment("download_count", id).await
    }

    #[allow(clippy::cast_sign_loss)]
    async fn count_by_status(&self, status: ReportStatus) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reports WHERE status = ?")
            .bind(status.as_str())
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
    use chrono::{Duration, Utc};
    use insightplace_core::{NewReport, ReportUpdate};

    fn report(title: &str, company_id: &str, status: ReportStatus) -> Report {
        NewReport {
            title: title.into(),
            description: Some("Quarterly numbers".into()),
            company_id: company_id.into(),
            status,
            tags: vec!["finance".into()],
            main_file: format!("Acme/{title}/index.html"),
            supporting_files: vec![format!("Acme/{title}/chart.png")],
            file_size: 2048,
            allow_download: false,
            uploaded_by: "admin-id".into(),
        }
        .into_report()
    }

    async fn repo() -> SqliteReportRepository {
        SqliteReportRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn insert_and_get_preserves_json_columns() {
        let repo = repo().await;
        let q1 = report("Q1", "c1", ReportStatus::Published);
        repo.insert(&q1).await.unwrap();

        let stored = repo.get_by_id(&q1.id).await.unwrap().unwrap();
        assert_eq!(stored.tags, vec!["finance"]);
        assert_eq!(stored.supporting_files, vec!["Acme/Q1/chart.png"]);
        assert_eq!(stored.file_size, 2048);
        assert_eq!(stored.status, ReportStatus::Published);
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_and_orders_newest_first() {
        let repo = repo().await;
        let mut older = report("Q1", "c1", ReportStatus::Published);
        older.created_at = Utc::now() - Duration::days(1);
        let newer = report("Q2", "c1", ReportStatus::Published);
        let draft = report("Q3", "c1", ReportStatus::Draft);
        let foreign = report("Q4", "c2", ReportStatus::Published);
        for r in [&older, &newer, &draft, &foreign] {
            repo.insert(r).await.unwrap();
        }

        let titles: Vec<String> = repo
            .list(Some("c1"), Some(ReportStatus::Published))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Q2", "Q1"]);
        assert_eq!(repo.list(None, None).await.unwrap().len(), 4);
        assert_eq!(repo.list(Some("c1"), None).await.unwrap().len(), 3);
        assert_eq!(
            repo.count_by_status(ReportStatus::Published).await.unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn update_and_counters() {
        let repo = repo().await;
        let mut q1 = report("Q1", "c1", ReportStatus::Published);
        repo.insert(&q1).await.unwrap();

        let update = ReportUpdate {
            status: Some(ReportStatus::Archived),
            allow_download: Some(true),
            ..Default::default()
        };
        assert!(update.apply(&mut q1));
        repo.update(&q1).await.unwrap();
        repo.increment_views(&q1.id).await.unwrap();
        repo.increment_views(&q1.id).await.unwrap();
        repo.increment_downloads(&q1.id).await.unwrap();

        let stored = repo.get_by_id(&q1.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReportStatus::Archived);
        assert!(stored.allow_download);
        assert_eq!(stored.view_count, 2);
        assert_eq!(stored.download_count, 1);
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = repo().await;
        let q1 = report("Q1", "c1", ReportStatus::Published);
        repo.insert(&q1).await.unwrap();
        repo.delete(&q1.id).await.unwrap();
        assert!(repo.get_by_id(&q1.id).await.unwrap().is_none());

        let err = repo.delete(&q1.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
        let err = repo.increment_views(&q1.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
