//! Legacy status check repository.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::StatusCheck;

#[async_trait]
pub trait StatusCheckRepository: Send + Sync {
    async fn insert(&self, check: &StatusCheck) -> Result<(), RepositoryError>;

    /// Oldest first, at most `limit` entries.
    async fn list(&self, limit: u32) -> Result<Vec<StatusCheck>, RepositoryError>;
}
