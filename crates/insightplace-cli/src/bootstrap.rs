//! CLI bootstrap - the composition root for operator commands.
//!
//! Wires the database, report store and mail transport into a `PortalCore`
//! and resolves the admin account that commands act as.

use anyhow::{Context, Result};
use insightplace_axum::bootstrap::build_notifier;
use insightplace_core::{
    Company, PortalConfig, PortalCore, ReportStore, Repos, SeedSettings, SeedSummary,
    TokenIssuer, User, UserRole,
};
use insightplace_db::{CoreFactory, setup_database};

use crate::error::CliError;

/// Fully composed context for CLI commands.
pub struct CliContext {
    core: PortalCore,
    repos: Repos,
    seed: SeedSettings,
}

impl CliContext {
    pub const fn new(core: PortalCore, repos: Repos, seed: SeedSettings) -> Self {
        Self { core, repos, seed }
    }

    pub const fn core(&self) -> &PortalCore {
        &self.core
    }

    /// Run the idempotent seeder.
    pub async fn seed(&self) -> Result<SeedSummary> {
        Ok(self
            .core
            .seeder()
            .run(&self.seed)
            .await
            .map_err(CliError::from)?)
    }

    /// The admin account commands are performed as. Seeds it when missing.
    pub async fn operator(&self) -> Result<User> {
        self.seed().await?;
        let user = self
            .repos
            .users
            .get_by_email(&self.seed.admin_email)
            .await
            .map_err(|e| CliError::Database(e.to_string()))?
            .ok_or_else(|| {
                CliError::Config(format!("Admin account {} not found", self.seed.admin_email))
            })?;
        if user.role != UserRole::Admin || !user.active {
            return Err(CliError::Config(format!(
                "{} is not an active admin account",
                user.email
            ))
            .into());
        }
        Ok(user)
    }

    /// Find a company by exact id or, failing that, by name.
    pub async fn resolve_company(&self, key: &str) -> Result<Company> {
        if let Some(company) = self
            .repos
            .companies
            .get_by_id(key)
            .await
            .map_err(|e| CliError::Database(e.to_string()))?
        {
            return Ok(company);
        }
        Ok(self
            .repos
            .companies
            .get_by_name(key)
            .await
            .map_err(|e| CliError::Database(e.to_string()))?
            .ok_or_else(|| CliError::Arguments(format!("Company not found: {key}")))?)
    }
}

/// Open the database and assemble the core for operator commands.
pub async fn bootstrap(config: &PortalConfig) -> Result<CliContext> {
    tracing::debug!(
        database_path = %config.database_path.display(),
        upload_dir = %config.upload_dir.display(),
        "CLI bootstrap resolved paths"
    );

    let pool = setup_database(&config.database_path)
        .await
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let repos = CoreFactory::build_repos(pool.clone());

    let store = ReportStore::new(&config.upload_dir);
    let tokens = TokenIssuer::new(&config.secret_key, config.token_ttl());
    let notifier = build_notifier(&config.mail)?;
    let core = CoreFactory::build_portal_core(pool, tokens, store, notifier);

    Ok(CliContext::new(core, repos, config.seed.clone()))
}
