//! Legacy status check endpoint support.

use std::sync::Arc;

use crate::domain::{NewStatusCheck, StatusCheck};
use crate::ports::{CoreError, StatusCheckRepository};

/// Maximum number of status checks returned by a listing.
pub const STATUS_LIST_LIMIT: u32 = 1000;

#[derive(Clone)]
pub struct StatusService {
    repo: Arc<dyn StatusCheckRepository>,
}

impl StatusService {
    pub fn new(repo: Arc<dyn StatusCheckRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new: NewStatusCheck) -> Result<StatusCheck, CoreError> {
        if new.client_name.trim().is_empty() {
            return Err(CoreError::Validation("client_name is required".to_string()));
        }
        let check = new.into_check();
        self.repo.insert(&check).await?;
        Ok(check)
    }

    pub async fn list(&self) -> Result<Vec<StatusCheck>, CoreError> {
        Ok(self.repo.list(STATUS_LIST_LIMIT).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::Harness;

    #[tokio::test]
    async fn create_then_list() {
        let h = Harness::new();
        let created = h
            .core
            .status()
            .create(NewStatusCheck {
                client_name: "probe".into(),
            })
            .await
            .unwrap();
        let listed = h.core.status().list().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn blank_client_name_is_rejected() {
        let h = Harness::new();
        let err = h
            .core
            .status()
            .create(NewStatusCheck {
                client_name: " ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
