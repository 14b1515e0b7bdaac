//! User repository trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::User;

/// Repository for portal accounts.
///
/// # Design Rules
///
/// - `email` is unique across all users
/// - Implementations store the bcrypt hash as given; hashing happens in the service layer
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the email is taken
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// List users, optionally restricted to one company.
    async fn list(&self, company_id: Option<&str>) -> Result<Vec<User>, RepositoryError>;

    /// Replace all mutable fields of an existing user.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has `user.id`
    /// - `AlreadyExists` if the new email is taken
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> Result<(), RepositoryError>;

    async fn count_active(&self) -> Result<u64, RepositoryError>;
}
