//! Legacy connectivity status checks kept for older clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStatusCheck {
    pub client_name: String,
}

impl NewStatusCheck {
    pub fn into_check(self) -> StatusCheck {
        StatusCheck {
            id: Uuid::new_v4().to_string(),
            client_name: self.client_name,
            timestamp: Utc::now(),
        }
    }
}
