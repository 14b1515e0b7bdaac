//! In-memory port implementations for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;

use crate::domain::{
    ActivityFilter, ActivityLog, Company, NewCompany, Report, ReportStatus, StatusCheck, User,
    UserRole,
};
use crate::ports::{
    ActivityRepository, CompanyRepository, NotificationError, Notifier, ReportNotice,
    ReportRepository, Repos, RepositoryError, StatusCheckRepository, UserRepository, WelcomeNotice,
};
use crate::security::{PasswordHasher, TokenIssuer};
use crate::storage::ReportStore;

use super::PortalCore;

#[derive(Default)]
pub struct MemCompanies(Mutex<Vec<Company>>);

#[async_trait]
impl CompanyRepository for MemCompanies {
    async fn insert(&self, company: &Company) -> Result<(), RepositoryError> {
        let mut rows = self.0.lock().unwrap();
        if rows.iter().any(|c| c.name == company.name) {
            return Err(RepositoryError::AlreadyExists(company.name.clone()));
        }
        rows.push(company.clone());
        Ok(())
    }
    async fn get_by_id(&self, id: &str) -> Result<Option<Company>, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }
    async fn get_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().find(|c| c.name == name).cloned())
    }
    async fn list(&self) -> Result<Vec<Company>, RepositoryError> {
        let mut rows = self.0.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
    async fn count_active(&self) -> Result<u64, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().filter(|c| c.active).count() as u64)
    }
}

#[derive(Default)]
pub struct MemUsers(Mutex<Vec<User>>);

#[async_trait]
impl UserRepository for MemUsers {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut rows = self.0.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists(user.email.clone()));
        }
        rows.push(user.clone());
        Ok(())
    }
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }
    async fn list(&self, company_id: Option<&str>) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|u| company_id.is_none_or(|c| u.company_id == c))
            .cloned()
            .collect())
    }
    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut rows = self.0.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(RepositoryError::AlreadyExists(user.email.clone()));
        }
        let row = rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| RepositoryError::NotFound(user.id.clone()))?;
        *row = user.clone();
        Ok(())
    }
    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let mut rows = self.0.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        row.last_login = Some(at);
        Ok(())
    }
    async fn count_active(&self) -> Result<u64, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().filter(|u| u.active).count() as u64)
    }
}

#[derive(Default)]
pub struct MemReports(Mutex<Vec<Report>>);

impl MemReports {
    fn with_report<F>(&self, id: &str, f: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut Report),
    {
        let mut rows = self.0.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        f(row);
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for MemReports {
    async fn insert(&self, report: &Report) -> Result<(), RepositoryError> {
        self.0.lock().unwrap().push(report.clone());
        Ok(())
    }
    async fn get_by_id(&self, id: &str) -> Result<Option<Report>, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }
    async fn list(
        &self,
        company_id: Option<&str>,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>, RepositoryError> {
        let mut rows: Vec<Report> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|r| company_id.is_none_or(|c| r.company_id == c))
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
    async fn update(&self, report: &Report) -> Result<(), RepositoryError> {
        self.with_report(&report.id, |r| *r = report.clone())
    }
    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut rows = self.0.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }
    async fn increment_views(&self, id: &str) -> Result<(), RepositoryError> {
        self.with_report(id, |r| r.view_count += 1)
    }
    async fn increment_downloads(&self, id: &str) -> Result<(), RepositoryError> {
        self.with_report(id, |r| r.download_count += 1)
    }
    async fn count_by_status(&self, status: ReportStatus) -> Result<u64, RepositoryError> {
        Ok(self.0.lock().unwrap().iter().filter(|r| r.status == status).count() as u64)
    }
}

#[derive(Default)]
pub struct MemActivity(pub Mutex<Vec<ActivityLog>>);

#[async_trait]
impl ActivityRepository for MemActivity {
    async fn insert(&self, entry: &ActivityLog) -> Result<(), RepositoryError> {
        self.0.lock().unwrap().push(entry.clone());
        Ok(())
    }
    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityLog>, RepositoryError> {
        let rows = self.0.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|l| filter.user_id.as_ref().is_none_or(|u| l.user_id.as_ref() == Some(u)))
            .filter(|l| {
                filter
                    .activity_type
                    .as_deref()
                    .is_none_or(|t| l.activity_type.as_str() == t)
            })
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }
    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.0.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
pub struct MemStatus(Mutex<Vec<StatusCheck>>);

#[async_trait]
impl StatusCheckRepository for MemStatus {
    async fn insert(&self, check: &StatusCheck) -> Result<(), RepositoryError> {
        self.0.lock().unwrap().push(check.clone());
        Ok(())
    }
    async fn list(&self, limit: u32) -> Result<Vec<StatusCheck>, RepositoryError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Records every notice it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    pub welcomes: Mutex<Vec<WelcomeNotice>>,
    pub reports: Mutex<Vec<ReportNotice>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn welcome_user(&self, notice: &WelcomeNotice) -> Result<(), NotificationError> {
        self.welcomes.lock().unwrap().push(notice.clone());
        Ok(())
    }
    async fn report_published(&self, notice: &ReportNotice) -> Result<(), NotificationError> {
        self.reports.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// A core wired to in-memory ports plus handles for assertions.
pub struct Harness {
    pub core: PortalCore,
    pub repos: Repos,
    pub activity: Arc<MemActivity>,
    pub notifier: Arc<RecordingNotifier>,
    pub tokens: TokenIssuer,
    pub hasher: PasswordHasher,
    pub uploads: tempfile::TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let activity = Arc::new(MemActivity::default());
        let repos = Repos::new(
            Arc::new(MemCompanies::default()),
            Arc::new(MemUsers::default()),
            Arc::new(MemReports::default()),
            activity.clone(),
            Arc::new(MemStatus::default()),
        );
        let tokens = TokenIssuer::new(&SecretString::from("test-secret".to_string()), Duration::hours(1));
        let hasher = PasswordHasher::fast();
        let notifier = Arc::new(RecordingNotifier::default());
        let uploads = tempfile::TempDir::new().unwrap();
        let core = PortalCore::with_parts(
            repos.clone(),
            tokens.clone(),
            ReportStore::new(uploads.path()),
            hasher,
            notifier.clone(),
        );
        Self {
            core,
            repos,
            activity,
            notifier,
            tokens,
            hasher,
            uploads,
        }
    }

    pub fn upload_root(&self) -> &std::path::Path {
        self.uploads.path()
    }

    pub async fn company(&self, name: &str) -> Company {
        let company = NewCompany::new(name, None).into_company();
        self.repos.companies.insert(&company).await.unwrap();
        company
    }

    pub async fn user(&self, email: &str, password: &str, company: &Company, role: UserRole) -> User {
        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: email.split('@').next().unwrap_or(email).to_string(),
            company_id: company.id.clone(),
            role,
            active: true,
            hashed_password: self.hasher.hash(password).unwrap(),
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.repos.users.insert(&user).await.unwrap();
        user
    }

    pub fn activity_types(&self) -> Vec<String> {
        self.activity
            .0
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.activity_type.as_str().to_string())
            .collect()
    }
}
