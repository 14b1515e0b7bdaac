//! Composition utilities for building `PortalCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the portal with
//! `SQLite` repositories. It is focused purely on construction and should
//! not contain any domain logic.

use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

use insightplace_core::{Notifier, PasswordHasher, PortalCore, ReportStore, Repos, TokenIssuer};

use crate::repositories::{
    SqliteActivityRepository, SqliteCompanyRepository, SqliteReportRepository,
    SqliteStatusCheckRepository, SqliteUserRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Open (or create) the database at `db_path` with the full schema applied.
    pub async fn create_pool(db_path: &Path) -> anyhow::Result<SqlitePool> {
        crate::setup::setup_database(db_path).await
    }

    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteCompanyRepository::new(pool.clone())),
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteReportRepository::new(pool.clone())),
            Arc::new(SqliteActivityRepository::new(pool.clone())),
            Arc::new(SqliteStatusCheckRepository::new(pool)),
        )
    }

    /// Build a complete `PortalCore` from a pool.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CoreFactory::build_repos(pool);
    /// let core = PortalCore::with_parts(repos, tokens, store, PasswordHasher::default(), notifier);
    /// ```
    pub fn build_portal_core(
        pool: SqlitePool,
        tokens: TokenIssuer,
        store: ReportStore,
        notifier: Arc<dyn Notifier>,
    ) -> PortalCore {
        let repos = Self::build_repos(pool);
        PortalCore::with_parts(repos, tokens, store, PasswordHasher::default(), notifier)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }
}
