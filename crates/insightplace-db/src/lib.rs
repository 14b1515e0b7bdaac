//! `SQLite` persistence for the InsightPlace client portal.
//!
//! Implements the repository ports of `insightplace-core` on top of `sqlx`
//! and provides the composition helpers adapters use to build a `PortalCore`.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{
    SqliteActivityRepository, SqliteCompanyRepository, SqliteReportRepository,
    SqliteStatusCheckRepository, SqliteUserRepository,
};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
