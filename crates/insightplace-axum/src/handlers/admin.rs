//! Admin panel handlers: companies, users, reports and the audit feed.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use insightplace_core::{
    ActivityFilter, ActivityLog, Company, DashboardStats, NewCompany, NewUser, Report,
    ReportUpdate, ReportUpload, UploadOutcome, UploadedFile, UserResponse, UserUpdate,
};
use serde::Deserialize;

use super::MessageResponse;
use crate::error::HttpError;
use crate::extract::{AdminUser, RequestClient};
use crate::state::AppState;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

/// `?company_id=` filter shared by the user and report listings.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyFilter {
    pub company_id: Option<String>,
}

impl CompanyFilter {
    fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref().filter(|id| !id.is_empty())
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<DashboardStats>, HttpError> {
    Ok(Json(state.core.admin().dashboard(&admin).await?))
}

// ─────────────────────────────────────────────────────────────────────
// Companies
// ─────────────────────────────────────────────────────────────────────

pub async fn create_company(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    RequestClient(client): RequestClient,
    Json(req): Json<NewCompany>,
) -> Result<Json<Company>, HttpError> {
    Ok(Json(
        state
            .core
            .admin()
            .create_company(&admin, req, &client)
            .await?,
    ))
}

pub async fn list_companies(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<Company>>, HttpError> {
    Ok(Json(state.core.admin().list_companies(&admin).await?))
}

// ─────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────

pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    RequestClient(client): RequestClient,
    Json(req): Json<NewUser>,
) -> Result<Json<UserResponse>, HttpError> {
    Ok(Json(
        state.core.admin().create_user(&admin, req, &client).await?,
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    RequestClient(client): RequestClient,
    Path(user_id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<UserResponse>, HttpError> {
    Ok(Json(
        state
            .core
            .admin()
            .update_user(&admin, &user_id, req, &client)
            .await?,
    ))
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(filter): Query<CompanyFilter>,
) -> Result<Json<Vec<UserResponse>>, HttpError> {
    Ok(Json(
        state
            .core
            .admin()
            .list_users(&admin, filter.company_id())
            .await?,
    ))
}

// ─────────────────────────────────────────────────────────────────────
// Reports
// ─────────────────────────────────────────────────────────────────────

/// Form checkbox semantics: only a case-insensitive `"true"` is true.
fn form_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Read the upload form into memory.
///
/// Fields: `title`, `description`, `company_id`, `allow_download`,
/// `notify_users` and any number of `files`. File parts without a filename
/// are skipped.
pub async fn read_upload(mut multipart: Multipart) -> Result<ReportUpload, HttpError> {
    let mut title = None;
    let mut description = None;
    let mut company_id = None;
    let mut allow_download = false;
    let mut notify_users = false;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "file" => {
                // Nameless parts are passed on so the store can skip them
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = if filename.is_empty() {
                    Vec::new()
                } else {
                    field.bytes().await?.to_vec()
                };
                files.push(UploadedFile::new(filename, bytes));
            }
            "title" => title = Some(field.text().await?),
            "description" => description = Some(field.text().await?),
            "company_id" => company_id = Some(field.text().await?),
            "allow_download" => allow_download = form_flag(&field.text().await?),
            "notify_users" => notify_users = form_flag(&field.text().await?),
            other => {
                tracing::debug!(field = other, "Ignoring unknown upload field");
            }
        }
    }

    let title = title.ok_or_else(|| HttpError::BadRequest("Field required: title".to_string()))?;
    let company_id = company_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| HttpError::BadRequest("Field required: company_id".to_string()))?;

    Ok(ReportUpload {
        title,
        description: description.filter(|d| !d.is_empty()),
        company_id,
        allow_download,
        notify_users,
        files,
    })
}

pub async fn upload_report(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    RequestClient(client): RequestClient,
    multipart: Multipart,
) -> Result<Json<UploadOutcome>, HttpError> {
    let upload = read_upload(multipart).await?;
    Ok(Json(
        state
            .core
            .admin()
            .upload_report(&admin, upload, &client)
            .await?,
    ))
}

pub async fn list_reports(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(filter): Query<CompanyFilter>,
) -> Result<Json<Vec<Report>>, HttpError> {
    Ok(Json(
        state
            .core
            .admin()
            .list_reports(&admin, filter.company_id())
            .await?,
    ))
}

pub async fn update_report(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    RequestClient(client): RequestClient,
    Path(report_id): Path<String>,
    Json(req): Json<ReportUpdate>,
) -> Result<Json<Report>, HttpError> {
    Ok(Json(
        state
            .core
            .admin()
            .update_report(&admin, &report_id, req, &client)
            .await?,
    ))
}

pub async fn delete_report(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    RequestClient(client): RequestClient,
    Path(report_id): Path<String>,
) -> Result<Json<MessageResponse>, HttpError> {
    state
        .core
        .admin()
        .delete_report(&admin, &report_id, &client)
        .await?;
    Ok(Json(MessageResponse::new("Report deleted successfully")))
}

pub async fn activity_logs(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(filter): Query<ActivityFilter>,
) -> Result<Json<Vec<ActivityLog>>, HttpError> {
    let filter = ActivityFilter {
        user_id: filter.user_id.filter(|id| !id.is_empty()),
        activity_type: filter.activity_type.filter(|t| !t.is_empty()),
        ..filter
    };
    Ok(Json(
        state.core.admin().activity_logs(&admin, &filter).await?,
    ))
}
