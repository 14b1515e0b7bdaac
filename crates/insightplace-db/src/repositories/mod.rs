//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_activity_repository;
mod sqlite_company_repository;
mod sqlite_report_repository;
mod sqlite_status_repository;
mod sqlite_user_repository;

pub use sqlite_activity_repository::SqliteActivityRepository;
pub use sqlite_company_repository::SqliteCompanyRepository;
pub use sqlite_report_repository::SqliteReportRepository;
pub use sqlite_status_repository::SqliteStatusCheckRepository;
pub use sqlite_user_repository::SqliteUserRepository;
