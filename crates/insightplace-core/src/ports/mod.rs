//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Lookups return `Ok(None)` for absent rows; mutations of absent rows return `NotFound`
//! - Traits are minimal and CRUD-focused for repositories
//! - Intent-based methods for notifications (not transport-leaking)

pub mod activity_repository;
pub mod company_repository;
pub mod notifier;
pub mod report_repository;
pub mod status_repository;
pub mod user_repository;

use std::sync::Arc;
use thiserror::Error;

pub use activity_repository::ActivityRepository;
pub use company_repository::CompanyRepository;
pub use notifier::{NoopNotifier, NotificationError, Notifier, ReportNotice, WelcomeNotice};
pub use report_repository::ReportRepository;
pub use status_repository::StatusCheckRepository;
pub use user_repository::UserRepository;

use crate::security::SecurityError;
use crate::storage::StorageError;

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations. It lives in
/// `insightplace-core` so that `PortalCore` can accept it without depending on
/// `insightplace-db`.
#[derive(Clone)]
pub struct Repos {
    pub companies: Arc<dyn CompanyRepository>,
    pub users: Arc<dyn UserRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub activity: Arc<dyn ActivityRepository>,
    pub status_checks: Arc<dyn StatusCheckRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        users: Arc<dyn UserRepository>,
        reports: Arc<dyn ReportRepository>,
        activity: Arc<dyn ActivityRepository>,
        status_checks: Arc<dyn StatusCheckRepository>,
    ) -> Self {
        Self {
            companies,
            users,
            reports,
            activity,
            status_checks,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map it to their own error types (HTTP status codes, CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Invalid input.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist (or is not visible to the caller).
    #[error("{0}")]
    NotFound(String),

    /// Credentials missing or rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not permitted.
    #[error("{0}")]
    Forbidden(String),

    /// Report file storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A downstream service (mail provider) failed.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DisallowedFileType(ext) => {
                Self::Validation(format!("File type .{ext} not allowed"))
            }
            StorageError::InvalidPath(_) => Self::Forbidden("File access not allowed".to_string()),
            StorageError::NoFiles => Self::Validation("No files were uploaded".to_string()),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<SecurityError> for CoreError {
    fn from(err: SecurityError) -> Self {
        match err {
            SecurityError::InvalidToken(_) => {
                Self::Unauthorized("Could not validate credentials".to_string())
            }
            SecurityError::Hashing(msg) | SecurityError::Encoding(msg) => Self::Internal(msg),
        }
    }
}
