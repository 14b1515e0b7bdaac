//! `PortalCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, HTTP)
//! receive a `PortalCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{NoopNotifier, Notifier, Repos};
use crate::security::{PasswordHasher, TokenIssuer};
use crate::storage::ReportStore;

use super::{ActivityLogger, AdminService, AuthService, ClientService, Seeder, StatusService};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let repos = CoreFactory::build_repos(pool);
/// let core = PortalCore::new(repos, tokens, ReportStore::new("./uploads"));
///
/// let reports = core.client().list_reports(&user).await?;
/// ```
pub struct PortalCore {
    auth: AuthService,
    admin: AdminService,
    client: ClientService,
    activity: ActivityLogger,
    status: StatusService,
    seeder: Seeder,
    store: ReportStore,
}

impl PortalCore {
    /// Create a core with the default password cost and no email delivery.
    pub fn new(repos: Repos, tokens: TokenIssuer, store: ReportStore) -> Self {
        Self::with_parts(
            repos,
            tokens,
            store,
            PasswordHasher::default(),
            Arc::new(NoopNotifier::new()),
        )
    }

    pub fn with_parts(
        repos: Repos,
        tokens: TokenIssuer,
        store: ReportStore,
        hasher: PasswordHasher,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let activity = ActivityLogger::new(repos.activity.clone());
        Self {
            auth: AuthService::new(repos.clone(), tokens, hasher, activity.clone()),
            admin: AdminService::new(
                repos.clone(),
                store.clone(),
                hasher,
                notifier,
                activity.clone(),
            ),
            client: ClientService::new(repos.clone(), store.clone(), activity.clone()),
            status: StatusService::new(repos.status_checks.clone()),
            seeder: Seeder::new(repos, hasher),
            activity,
            store,
        }
    }

    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub const fn admin(&self) -> &AdminService {
        &self.admin
    }

    pub const fn client(&self) -> &ClientService {
        &self.client
    }

    pub const fn activity(&self) -> &ActivityLogger {
        &self.activity
    }

    pub const fn status(&self) -> &StatusService {
        &self.status
    }

    pub const fn seeder(&self) -> &Seeder {
        &self.seeder
    }

    pub const fn store(&self) -> &ReportStore {
        &self.store
    }
}
