//! Company repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Company;

/// Repository for company persistence.
///
/// Constraint: `name` is unique across all companies.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a new company.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if a company with the same name exists
    async fn insert(&self, company: &Company) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Company>, RepositoryError>;

    async fn get_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError>;

    /// List all companies ordered by name.
    async fn list(&self) -> Result<Vec<Company>, RepositoryError>;

    async fn count_active(&self) -> Result<u64, RepositoryError>;
}
