//! Company domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client organisation. Users and reports are scoped to exactly one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl NewCompany {
    /// Create an active company request.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            active: true,
        }
    }

    /// Materialise the request into a stored company with a fresh id.
    pub fn into_company(self) -> Company {
        let now = Utc::now();
        Company {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}
