//! Administrator operations: tenants, accounts, reports and the audit feed.

use std::sync::Arc;

use serde::Serialize;

use super::ActivityLogger;
use crate::domain::{
    ActivityFilter, ActivityLog, ActivityType, ClientInfo, Company, DashboardStats, NewActivity,
    NewCompany, NewReport, NewUser, Report, ReportStatus, ReportUpdate, User, UserResponse,
    UserUpdate, is_valid_email,
};
use crate::ports::{CoreError, Notifier, ReportNotice, Repos, WelcomeNotice};
use crate::security::PasswordHasher;
use crate::storage::{ReportStore, UploadedFile, format_file_size};

/// Entries shown on the dashboard.
const RECENT_ACTIVITY_COUNT: u32 = 10;

/// A multipart report upload, already read into memory.
#[derive(Debug, Clone)]
pub struct ReportUpload {
    pub title: String,
    pub description: Option<String>,
    pub company_id: String,
    pub allow_download: bool,
    pub notify_users: bool,
    pub files: Vec<UploadedFile>,
}

/// Summary returned after an upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub message: String,
    pub report_id: String,
    pub files_uploaded: usize,
    /// Human-readable, e.g. `1.5 MB`.
    pub total_size: String,
}

#[derive(Clone)]
pub struct AdminService {
    repos: Repos,
    store: ReportStore,
    hasher: PasswordHasher,
    notifier: Arc<dyn Notifier>,
    activity: ActivityLogger,
}

fn ensure_admin(user: &User) -> Result<(), CoreError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Admin access required".to_string()))
    }
}

fn invalid_email() -> CoreError {
    CoreError::Validation("Invalid email address".to_string())
}

impl AdminService {
    pub fn new(
        repos: Repos,
        store: ReportStore,
        hasher: PasswordHasher,
        notifier: Arc<dyn Notifier>,
        activity: ActivityLogger,
    ) -> Self {
        Self {
            repos,
            store,
            hasher,
            notifier,
            activity,
        }
    }

    pub async fn dashboard(&self, admin: &User) -> Result<DashboardStats, CoreError> {
        ensure_admin(admin)?;
        Ok(DashboardStats {
            total_companies: self.repos.companies.count_active().await?,
            total_users: self.repos.users.count_active().await?,
            total_reports: self
                .repos
                .reports
                .count_by_status(ReportStatus::Published)
                .await?,
            total_access_logs: self.activity.count().await?,
            recent_activities: self.activity.recent(RECENT_ACTIVITY_COUNT).await?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Companies
    // ─────────────────────────────────────────────────────────────────────

    pub async fn create_company(
        &self,
        admin: &User,
        new: NewCompany,
        client: &ClientInfo,
    ) -> Result<Company, CoreError> {
        ensure_admin(admin)?;
        let name = new.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Company name is required".to_string()));
        }
        if self.repos.companies.get_by_name(name).await?.is_some() {
            return Err(CoreError::Validation(
                "Company with this name already exists".to_string(),
            ));
        }

        let company = NewCompany {
            name: name.to_string(),
            ..new
        }
        .into_company();
        self.repos.companies.insert(&company).await?;
        tracing::info!(company_id = %company.id, name = %company.name, "Company created");

        self.activity
            .record(
                NewActivity::new(
                    ActivityType::CompanyCreate,
                    format!("Created company: {}", company.name),
                )
                .by_user(admin)
                .from_client(client),
            )
            .await;
        Ok(company)
    }

    pub async fn list_companies(&self, admin: &User) -> Result<Vec<Company>, CoreError> {
        ensure_admin(admin)?;
        Ok(self.repos.companies.list().await?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────

    pub async fn create_user(
        &self,
        admin: &User,
        new: NewUser,
        client: &ClientInfo,
    ) -> Result<UserResponse, CoreError> {
        ensure_admin(admin)?;
        if new.email.trim().is_empty() || new.password.is_empty() {
            return Err(CoreError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        if !is_valid_email(new.email.trim()) {
            return Err(invalid_email());
        }
        if self.repos.users.get_by_email(&new.email).await?.is_some() {
            return Err(CoreError::Validation(
                "User with this email already exists".to_string(),
            ));
        }
        let company = self.company(&new.company_id).await?;

        let hashed_password = self.hasher.hash_async(new.password.clone()).await?;
        let now = chrono::Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: new.email.clone(),
            full_name: new.full_name.clone(),
            company_id: company.id.clone(),
            role: new.role,
            active: new.active,
            hashed_password,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.repos.users.insert(&user).await?;
        tracing::info!(user_id = %user.id, company = %company.name, role = %user.role, "User created");

        self.activity
            .record(
                NewActivity::new(
                    ActivityType::UserCreate,
                    format!("Created user: {} for company: {}", user.email, company.name),
                )
                .by_user(admin)
                .from_client(client),
            )
            .await;

        if new.send_welcome_email {
            let notice = WelcomeNotice {
                full_name: user.full_name.clone(),
                email: user.email.clone(),
                password: new.password,
            };
            if let Err(e) = self.notifier.welcome_user(&notice).await {
                tracing::warn!(email = %user.email, error = %e, "Welcome email not sent");
            }
        }

        Ok(UserResponse::from(user))
    }

    pub async fn update_user(
        &self,
        admin: &User,
        user_id: &str,
        update: UserUpdate,
        client: &ClientInfo,
    ) -> Result<UserResponse, CoreError> {
        ensure_admin(admin)?;
        let mut user = self
            .repos
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;
        if update.is_empty() {
            return Ok(UserResponse::from(user));
        }

        if let Some(email) = update.email.filter(|e| *e != user.email) {
            if !is_valid_email(&email) {
                return Err(invalid_email());
            }
            if self.repos.users.get_by_email(&email).await?.is_some() {
                return Err(CoreError::Validation(
                    "User with this email already exists".to_string(),
                ));
            }
            user.email = email;
        }
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(active) = update.active {
            user.active = active;
        }
        if let Some(password) = update.password {
            user.hashed_password = self.hasher.hash_async(password).await?;
        }
        user.updated_at = chrono::Utc::now();
        self.repos.users.update(&user).await?;

        self.activity
            .record(
                NewActivity::new(ActivityType::UserUpdate, format!("Updated user: {}", user.email))
                    .by_user(admin)
                    .from_client(client)
                    .with_meta("user_id", user.id.clone()),
            )
            .await;
        Ok(UserResponse::from(user))
    }

    pub async fn list_users(
        &self,
        admin: &User,
        company_id: Option<&str>,
    ) -> Result<Vec<UserResponse>, CoreError> {
        ensure_admin(admin)?;
        let users = self.repos.users.list(company_id).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reports
    // ─────────────────────────────────────────────────────────────────────

    /// Store uploaded files and publish a report for the company.
    pub async fn upload_report(
        &self,
        admin: &User,
        upload: ReportUpload,
        client: &ClientInfo,
    ) -> Result<UploadOutcome, CoreError> {
        ensure_admin(admin)?;
        let title = upload.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::Validation("Title is required".to_string()));
        }
        let company = self.company(&upload.company_id).await?;

        let stored = self.store.store(&company.name, &title, upload.files).await?;
        let files_uploaded = stored.file_count();

        let report = NewReport {
            title: title.clone(),
            description: upload.description,
            company_id: company.id.clone(),
            status: ReportStatus::Published,
            tags: Vec::new(),
            main_file: stored.main_file,
            supporting_files: stored.supporting_files,
            file_size: stored.total_bytes,
            allow_download: upload.allow_download,
            uploaded_by: admin.id.clone(),
        }
        .into_report();
        self.repos.reports.insert(&report).await?;
        tracing::info!(
            report_id = %report.id,
            company = %company.name,
            files = files_uploaded,
            bytes = report.file_size,
            "Report uploaded"
        );

        self.activity
            .record(
                NewActivity::new(
                    ActivityType::ReportUpload,
                    format!("Uploaded report '{title}' for {}", company.name),
                )
                .by_user(admin)
                .from_client(client)
                .with_meta("report_id", report.id.clone())
                .with_meta("file_count", files_uploaded),
            )
            .await;

        if upload.notify_users {
            self.notify_company(&company, &report).await;
        }

        Ok(UploadOutcome {
            message: "Report uploaded successfully".to_string(),
            report_id: report.id,
            files_uploaded,
            total_size: format_file_size(report.file_size),
        })
    }

    async fn notify_company(&self, company: &Company, report: &Report) {
        let recipients = match self.repos.users.list(Some(&company.id)).await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(company = %company.name, error = %e, "Could not load report recipients");
                return;
            }
        };
        for user in recipients.into_iter().filter(|u| u.active) {
            let notice = ReportNotice {
                recipient_name: user.full_name,
                recipient_email: user.email,
                report_title: report.title.clone(),
                company_name: company.name.clone(),
            };
            if let Err(e) = self.notifier.report_published(&notice).await {
                tracing::warn!(email = %notice.recipient_email, error = %e, "Report notification not sent");
            }
        }
    }

    pub async fn list_reports(
        &self,
        admin: &User,
        company_id: Option<&str>,
    ) -> Result<Vec<Report>, CoreError> {
        ensure_admin(admin)?;
        Ok(self.repos.reports.list(company_id, None).await?)
    }

    pub async fn update_report(
        &self,
        admin: &User,
        report_id: &str,
        update: ReportUpdate,
        client: &ClientInfo,
    ) -> Result<Report, CoreError> {
        ensure_admin(admin)?;
        let mut report = self.report(report_id).await?;
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CoreError::Validation("Title is required".to_string()));
        }
        if !update.apply(&mut report) {
            return Ok(report);
        }
        self.repos.reports.update(&report).await?;

        self.activity
            .record(
                NewActivity::new(
                    ActivityType::ReportUpdate,
                    format!("Updated report: {}", report.title),
                )
                .by_user(admin)
                .from_client(client)
                .with_meta("report_id", report.id.clone())
                .with_meta("status", report.status.as_str()),
            )
            .await;
        Ok(report)
    }

    /// Remove a report and its files.
    pub async fn delete_report(
        &self,
        admin: &User,
        report_id: &str,
        client: &ClientInfo,
    ) -> Result<(), CoreError> {
        ensure_admin(admin)?;
        let report = self.report(report_id).await?;
        self.repos.reports.delete(&report.id).await?;

        // Reports re-uploaded under the same title share paths on disk
        let siblings = self
            .repos
            .reports
            .list(Some(&report.company_id), None)
            .await?;
        let orphaned = report
            .files()
            .filter(|path| !siblings.iter().any(|other| other.owns_file(path)))
            .collect::<Vec<&str>>();

        match self.store.remove_files(orphaned).await {
            Ok(removed) => tracing::info!(report_id = %report.id, removed, "Report deleted"),
            Err(e) => {
                tracing::warn!(report_id = %report.id, error = %e, "Report deleted but files remain on disk");
            }
        }

        self.activity
            .record(
                NewActivity::new(
                    ActivityType::ReportDelete,
                    format!("Deleted report: {}", report.title),
                )
                .by_user(admin)
                .from_client(client)
                .with_meta("report_id", report.id.clone()),
            )
            .await;
        Ok(())
    }

    pub async fn activity_logs(
        &self,
        admin: &User,
        filter: &ActivityFilter,
    ) -> Result<Vec<ActivityLog>, CoreError> {
        ensure_admin(admin)?;
        self.activity.list(filter).await
    }

    async fn company(&self, id: &str) -> Result<Company, CoreError> {
        self.repos
            .companies
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Company not found".to_string()))
    }

    async fn report(&self, id: &str) -> Result<Report, CoreError> {
        self.repos
            .reports
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Report not found".to_string()))
    }
}
