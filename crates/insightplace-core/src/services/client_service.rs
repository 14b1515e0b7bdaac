//! Client-facing report access, scoped to the caller's company.

use std::path::PathBuf;

use super::ActivityLogger;
use crate::domain::{ActivityType, ClientInfo, Company, NewActivity, Report, ReportStatus, User};
use crate::ports::{CoreError, Repos};
use crate::storage::ReportStore;

const REPORT_NOT_FOUND: &str = "Report not found";
const FILE_NOT_ALLOWED: &str = "File access not allowed";

/// A report file located on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the upload root.
    pub relative: String,
}

impl ReportFile {
    /// Final path segment, used as the download name.
    pub fn file_name(&self) -> &str {
        self.relative
            .rsplit_once('/')
            .map_or(self.relative.as_str(), |(_, name)| name)
    }
}

#[derive(Clone)]
pub struct ClientService {
    repos: Repos,
    store: ReportStore,
    activity: ActivityLogger,
}

impl ClientService {
    pub const fn new(repos: Repos, store: ReportStore, activity: ActivityLogger) -> Self {
        Self {
            repos,
            store,
            activity,
        }
    }

    /// Published reports of the caller's company, newest first.
    pub async fn list_reports(&self, user: &User) -> Result<Vec<Report>, CoreError> {
        Ok(self
            .repos
            .reports
            .list(Some(&user.company_id), Some(ReportStatus::Published))
            .await?)
    }

    /// Report details. Counts as a view.
    pub async fn report(
        &self,
        user: &User,
        report_id: &str,
        client: &ClientInfo,
    ) -> Result<Report, CoreError> {
        let mut report = self.visible_report(user, report_id).await?;
        self.repos.reports.increment_views(&report.id).await?;
        report.view_count += 1;

        self.activity
            .record(
                NewActivity::new(
                    ActivityType::ReportView,
                    format!("Viewed report: {}", report.title),
                )
                .by_user(user)
                .from_client(client)
                .with_meta("report_id", report.id.clone()),
            )
            .await;
        Ok(report)
    }

    /// The report's main file, for inline viewing.
    pub async fn view(
        &self,
        user: &User,
        report_id: &str,
        client: &ClientInfo,
    ) -> Result<(Report, ReportFile), CoreError> {
        let report = self.visible_report(user, report_id).await?;
        if report.main_file.is_empty() || !self.store.exists(&report.main_file).await {
            return Err(CoreError::NotFound("Report file not found".to_string()));
        }
        let file = ReportFile {
            path: self.store.resolve(&report.main_file)?,
            relative: report.main_file.clone(),
        };

        self.activity
            .record(
                NewActivity::new(
                    ActivityType::ReportView,
                    format!("Opened report file: {}", report.title),
                )
                .by_user(user)
                .from_client(client)
                .with_meta("report_id", report.id.clone())
                .with_meta("file", report.main_file.clone()),
            )
            .await;
        Ok((report, file))
    }

    /// A file referenced from the main file, relative to its directory.
    pub async fn asset(
        &self,
        user: &User,
        report_id: &str,
        asset: &str,
    ) -> Result<ReportFile, CoreError> {
        let report = self.visible_report(user, report_id).await?;
        let relative = report
            .resolve_asset(asset)
            .ok_or_else(|| CoreError::Forbidden(FILE_NOT_ALLOWED.to_string()))?;
        self.existing_file(relative).await
    }

    /// A report file for download. Defaults to the main file.
    pub async fn download(
        &self,
        user: &User,
        report_id: &str,
        file_path: Option<&str>,
        client: &ClientInfo,
    ) -> Result<ReportFile, CoreError> {
        let report = self.visible_report(user, report_id).await?;
        if !report.allow_download {
            return Err(CoreError::Forbidden(
                "Download not allowed for this report".to_string(),
            ));
        }

        let target = file_path
            .filter(|p| !p.is_empty())
            .unwrap_or(&report.main_file);
        if !report.owns_file(target) {
            return Err(CoreError::Forbidden(FILE_NOT_ALLOWED.to_string()));
        }
        let file = self.existing_file(target.to_string()).await?;

        self.repos.reports.increment_downloads(&report.id).await?;
        self.activity
            .record(
                NewActivity::new(
                    ActivityType::ReportDownload,
                    format!("Downloaded file: {target} from report: {}", report.title),
                )
                .by_user(user)
                .from_client(client)
                .with_meta("report_id", report.id.clone())
                .with_meta("file", target),
            )
            .await;
        tracing::debug!(report_id = %report.id, file = %file.relative, "Report file downloaded");
        Ok(file)
    }

    pub async fn company(&self, user: &User) -> Result<Company, CoreError> {
        self.repos
            .companies
            .get_by_id(&user.company_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Company not found".to_string()))
    }

    async fn visible_report(&self, user: &User, report_id: &str) -> Result<Report, CoreError> {
        self.repos
            .reports
            .get_by_id(report_id)
            .await?
            .filter(|r| r.is_visible_to(user))
            .ok_or_else(|| CoreError::NotFound(REPORT_NOT_FOUND.to_string()))
    }

    async fn existing_file(&self, relative: String) -> Result<ReportFile, CoreError> {
        let path = self.store.resolve(&relative)?;
        if !self.store.exists(&relative).await {
            return Err(CoreError::NotFound("File not found".to_string()));
        }
        Ok(ReportFile { path, relative })
    }
}
