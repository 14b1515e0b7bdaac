//! Audit trail writer and reader.

use std::sync::Arc;

use crate::domain::{ActivityFilter, ActivityLog, NewActivity};
use crate::ports::{ActivityRepository, CoreError};

/// Upper bound for a single activity page.
pub const MAX_ACTIVITY_LIMIT: u32 = 1000;

/// Records audit events and serves the activity feed.
#[derive(Clone)]
pub struct ActivityLogger {
    repo: Arc<dyn ActivityRepository>,
}

impl ActivityLogger {
    pub fn new(repo: Arc<dyn ActivityRepository>) -> Self {
        Self { repo }
    }

    /// Persist an audit event.
    ///
    /// Failures are logged and swallowed: a broken audit write never fails
    /// the request that triggered it.
    pub async fn record(&self, activity: NewActivity) {
        let kind = activity.activity_type();
        let log = activity.into_log();
        if let Err(e) = self.repo.insert(&log).await {
            tracing::error!(activity_type = %kind, error = %e, "Failed to record activity");
        }
    }

    /// Newest entries first, filtered and capped.
    pub async fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityLog>, CoreError> {
        let mut filter = filter.clone();
        filter.limit = filter.limit.min(MAX_ACTIVITY_LIMIT);
        Ok(self.repo.list(&filter).await?)
    }

    /// The `n` most recent entries.
    pub async fn recent(&self, n: u32) -> Result<Vec<ActivityLog>, CoreError> {
        self.list(&ActivityFilter {
            limit: n,
            ..ActivityFilter::default()
        })
        .await
    }

    pub async fn count(&self) -> Result<u64, CoreError> {
        Ok(self.repo.count().await?)
    }
}
