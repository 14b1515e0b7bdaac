//! Report domain types and visibility rules.
//!
//! File paths on a report are relative to the upload root and always use `/`
//! as separator, independent of the host platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::user::User;

/// Publication state of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ReportStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown report status: {other}")),
        }
    }
}

/// A confidential report delivered to one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub company_id: String,
    pub status: ReportStatus,
    pub tags: Vec<String>,
    /// Entry point shown in the viewer, usually an HTML file.
    pub main_file: String,
    pub supporting_files: Vec<String>,
    pub file_size: u64,
    pub download_count: u64,
    pub view_count: u64,
    /// View-only reports refuse downloads.
    pub allow_download: bool,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Whether `user` may see this report through the client API.
    pub fn is_visible_to(&self, user: &User) -> bool {
        self.status == ReportStatus::Published && self.company_id == user.company_id
    }

    /// Every file belonging to the report, main file first.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_file.as_str())
            .filter(|f| !f.is_empty())
            .chain(self.supporting_files.iter().map(String::as_str))
    }

    pub fn owns_file(&self, path: &str) -> bool {
        self.files().any(|f| f == path)
    }

    /// Resolve an asset reference from the main file's HTML to a report file.
    ///
    /// `asset` is interpreted relative to the directory of `main_file`. Returns
    /// `None` when the normalised path leaves the upload root or is not one of
    /// the report's files.
    pub fn resolve_asset(&self, asset: &str) -> Option<String> {
        let base = self
            .main_file
            .rsplit_once('/')
            .map_or("", |(dir, _)| dir);
        let joined = if base.is_empty() {
            asset.to_string()
        } else {
            format!("{base}/{asset}")
        };
        let normalized = normalize_relative(&joined)?;
        self.owns_file(&normalized).then_some(normalized)
    }
}

/// Lexically normalise a `/`-separated relative path.
///
/// Returns `None` for absolute paths or paths that climb above the root.
pub fn normalize_relative(path: &str) -> Option<String> {
    if path.starts_with('/') || path.contains('\\') {
        return None;
    }
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            s => parts.push(s),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Everything needed to persist a freshly uploaded report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: Option<String>,
    pub company_id: String,
    pub status: ReportStatus,
    pub tags: Vec<String>,
    pub main_file: String,
    pub supporting_files: Vec<String>,
    pub file_size: u64,
    pub allow_download: bool,
    pub uploaded_by: String,
}

impl NewReport {
    pub fn into_report(self) -> Report {
        let now = Utc::now();
        Report {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            company_id: self.company_id,
            status: self.status,
            tags: self.tags,
            main_file: self.main_file,
            supporting_files: self.supporting_files,
            file_size: self.file_size,
            download_count: 0,
            view_count: 0,
            allow_download: self.allow_download,
            uploaded_by: self.uploaded_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of report metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ReportStatus>,
    pub tags: Option<Vec<String>>,
    pub allow_download: Option<bool>,
}

impl ReportUpdate {
    /// Apply the update in place. Returns true if anything changed.
    pub fn apply(&self, report: &mut Report) -> bool {
        let before = report.clone();
        if let Some(ref title) = self.title {
            report.title.clone_from(title);
        }
        if let Some(ref description) = self.description {
            report.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            report.status = status;
        }
        if let Some(ref tags) = self.tags {
            report.tags.clone_from(tags);
        }
        if let Some(allow) = self.allow_download {
            report.allow_download = allow;
        }
        let changed = *report != before;
        if changed {
            report.updated_at = Utc::now();
        }
        changed
    }
}
