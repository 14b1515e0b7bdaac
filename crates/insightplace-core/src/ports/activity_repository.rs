//! Activity log repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{ActivityFilter, ActivityLog};

/// Append-only store for audit entries.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn insert(&self, entry: &ActivityLog) -> Result<(), RepositoryError>;

    /// Entries matching `filter`, newest first, at most `filter.limit`.
    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityLog>, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
