//! Audit trail types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::user::User;

/// Kind of audited event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Login,
    Logout,
    ReportView,
    ReportDownload,
    ReportUpload,
    ReportUpdate,
    ReportDelete,
    UserCreate,
    UserUpdate,
    CompanyCreate,
    FailedLogin,
}

impl ActivityType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::ReportView => "report_view",
            Self::ReportDownload => "report_download",
            Self::ReportUpload => "report_upload",
            Self::ReportUpdate => "report_update",
            Self::ReportDelete => "report_delete",
            Self::UserCreate => "user_create",
            Self::UserUpdate => "user_update",
            Self::CompanyCreate => "company_create",
            Self::FailedLogin => "failed_login",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "login" => Self::Login,
            "logout" => Self::Logout,
            "report_view" => Self::ReportView,
            "report_download" => Self::ReportDownload,
            "report_upload" => Self::ReportUpload,
            "report_update" => Self::ReportUpdate,
            "report_delete" => Self::ReportDelete,
            "user_create" => Self::UserCreate,
            "user_update" => Self::UserUpdate,
            "company_create" => Self::CompanyCreate,
            "failed_login" => Self::FailedLogin,
            other => return Err(format!("unknown activity type: {other}")),
        })
    }
}

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub activity_type: ActivityType,
    pub description: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// Where a request came from. Attached to every audit entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn new(ip_address: impl Into<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent,
        }
    }
}

/// Builder for an audit entry.
#[derive(Debug, Clone)]
pub struct NewActivity {
    user_id: Option<String>,
    user_email: Option<String>,
    activity_type: ActivityType,
    description: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl NewActivity {
    pub fn new(activity_type: ActivityType, description: impl Into<String>) -> Self {
        Self {
            user_id: None,
            user_email: None,
            activity_type,
            description: description.into(),
            ip_address: None,
            user_agent: None,
            metadata: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn by_user(mut self, user: &User) -> Self {
        self.user_id = Some(user.id.clone());
        self.user_email = Some(user.email.clone());
        self
    }

    #[must_use]
    pub fn by_identity(mut self, user_id: Option<String>, email: impl Into<String>) -> Self {
        self.user_id = user_id;
        self.user_email = Some(email.into());
        self
    }

    #[must_use]
    pub fn from_client(mut self, client: &ClientInfo) -> Self {
        self.ip_address = Some(client.ip_address.clone());
        self.user_agent.clone_from(&client.user_agent);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub const fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn into_log(self) -> ActivityLog {
        ActivityLog {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id,
            user_email: self.user_email,
            activity_type: self.activity_type,
            description: self.description,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            metadata: self.metadata,
            timestamp: Utc::now(),
        }
    }
}

/// Query for the admin activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilter {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
}

/// Default page size of the activity feed.
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 100;

const fn default_limit() -> u32 {
    DEFAULT_ACTIVITY_LIMIT
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            limit: DEFAULT_ACTIVITY_LIMIT,
            user_id: None,
            activity_type: None,
        }
    }
}

/// Admin dashboard counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_companies: u64,
    pub total_users: u64,
    pub total_reports: u64,
    pub total_access_logs: u64,
    pub recent_activities: Vec<ActivityLog>,
}
