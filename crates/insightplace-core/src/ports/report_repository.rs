//! Report repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Report, ReportStatus};

/// Repository for report metadata. File contents live in the report store.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: &Report) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Report>, RepositoryError>;

    /// List reports newest first, optionally filtered by company and status.
    async fn list(
        &self,
        company_id: Option<&str>,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>, RepositoryError>;

    /// Persist metadata changes (title, description, status, tags, download flag).
    async fn update(&self, report: &Report) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    async fn increment_views(&self, id: &str) -> Result<(), RepositoryError>;

    async fn increment_downloads(&self, id: &str) -> Result<(), RepositoryError>;

    async fn count_by_status(&self, status: ReportStatus) -> Result<u64, RepositoryError>;
}
