//! Row mapping helpers for `SQLite` queries.
//!
//! Timestamps are stored as RFC 3339 text with microsecond precision, which
//! keeps `ORDER BY` on the raw column chronological.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use insightplace_core::{
    ActivityLog, ActivityType, Company, Report, ReportStatus, RepositoryError, StatusCheck, User,
    UserRole,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

pub const COMPANY_COLUMNS: &str = "id, name, description, active, created_at, updated_at";

pub const USER_COLUMNS: &str = "id, email, full_name, company_id, role, active, hashed_password, last_login, created_at, updated_at";

pub const REPORT_COLUMNS: &str = "id, title, description, company_id, status, tags, main_file, supporting_files, file_size, download_count, view_count, allow_download, uploaded_by, created_at, updated_at";

pub const ACTIVITY_COLUMNS: &str = "id, user_id, user_email, activity_type, description, ip_address, user_agent, metadata, timestamp";

/// Map `SQLx` errors to `RepositoryError`, detecting unique violations.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") {
        return RepositoryError::AlreadyExists(msg);
    }
    if msg.contains("constraint failed") {
        return RepositoryError::Constraint(msg);
    }
    RepositoryError::Storage(msg)
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Storage(e.to_string()))
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp. Accepts RFC 3339 and `SQLite`'s `datetime('now')` format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s.trim_end_matches(" UTC"), "%Y-%m-%d %H:%M:%S%.f")
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .map_err(|e| RepositoryError::Serialization(format!("bad timestamp {s:?}: {e}")))
}

fn opt_datetime(row: &SqliteRow, name: &str) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    column::<Option<String>>(row, name)?
        .as_deref()
        .map(parse_datetime)
        .transpose()
}

fn datetime(row: &SqliteRow, name: &str) -> Result<DateTime<Utc>, RepositoryError> {
    parse_datetime(&column::<String>(row, name)?)
}

fn json_column<T: serde::de::DeserializeOwned>(
    row: &SqliteRow,
    name: &str,
) -> Result<T, RepositoryError> {
    let raw: String = column(row, name)?;
    serde_json::from_str(&raw).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

#[allow(clippy::cast_sign_loss)]
fn counter(row: &SqliteRow, name: &str) -> Result<u64, RepositoryError> {
    Ok(column::<i64>(row, name)?.max(0) as u64)
}

pub fn row_to_company(row: &SqliteRow) -> Result<Company, RepositoryError> {
    Ok(Company {
        id: column(row, "id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        active: column(row, "active")?,
        created_at: datetime(row, "created_at")?,
        updated_at: datetime(row, "updated_at")?,
    })
}

pub fn row_to_user(row: &SqliteRow) -> Result<User, RepositoryError> {
    let role: String = column(row, "role")?;
    Ok(User {
        id: column(row, "id")?,
        email: column(row, "email")?,
        full_name: column(row, "full_name")?,
        company_id: column(row, "company_id")?,
        role: role
            .parse::<UserRole>()
            .map_err(RepositoryError::Serialization)?,
        active: column(row, "active")?,
        hashed_password: column(row, "hashed_password")?,
        last_login: opt_datetime(row, "last_login")?,
        created_at: datetime(row, "created_at")?,
        updated_at: datetime(row, "updated_at")?,
    })
}

pub fn row_to_report(row: &SqliteRow) -> Result<Report, RepositoryError> {
    let status: String = column(row, "status")?;
    Ok(Report {
        id: column(row, "id")?,
        title: column(row, "title")?,
        description: column(row, "description")?,
        company_id: column(row, "company_id")?,
        status: status
            .parse::<ReportStatus>()
            .map_err(RepositoryError::Serialization)?,
        tags: json_column(row, "tags")?,
        main_file: column(row, "main_file")?,
        supporting_files: json_column(row, "supporting_files")?,
        file_size: counter(row, "file_size")?,
        download_count: counter(row, "download_count")?,
        view_count: counter(row, "view_count")?,
        allow_download: column(row, "allow_download")?,
        uploaded_by: column(row, "uploaded_by")?,
        created_at: datetime(row, "created_at")?,
        updated_at: datetime(row, "updated_at")?,
    })
}

pub fn row_to_activity(row: &SqliteRow) -> Result<ActivityLog, RepositoryError> {
    let activity_type: String = column(row, "activity_type")?;
    Ok(ActivityLog {
        id: column(row, "id")?,
        user_id: column(row, "user_id")?,
        user_email: column(row, "user_email")?,
        activity_type: activity_type
            .parse::<ActivityType>()
            .map_err(RepositoryError::Serialization)?,
        description: column(row, "description")?,
        ip_address: column(row, "ip_address")?,
        user_agent: column(row, "user_agent")?,
        metadata: json_column(row, "metadata")?,
        timestamp: datetime(row, "timestamp")?,
    })
}

pub fn row_to_status_check(row: &SqliteRow) -> Result<StatusCheck, RepositoryError> {
    Ok(StatusCheck {
        id: column(row, "id")?,
        client_name: column(row, "client_name")?,
        timestamp: datetime(row, "timestamp")?,
    })
}
