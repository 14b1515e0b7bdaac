//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together
//! for the web adapter: database, report store, token issuer and mail.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use insightplace_core::{
    MailSettings, NoopNotifier, Notifier, PortalConfig, PortalCore, ReportStore, TokenIssuer,
};
use insightplace_db::{CoreFactory, setup_database};
use insightplace_mail::{MailConfig, ResendNotifier};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// An empty list means any origin.
    pub fn from_origins(origins: &[String]) -> Self {
        if origins.is_empty() {
            Self::AllowAll
        } else {
            Self::AllowOrigins(origins.to_vec())
        }
    }
}

/// Listener settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub fn from_portal(config: &PortalConfig) -> Self {
        Self {
            port: config.port,
            cors: CorsConfig::from_origins(&config.cors_origins),
        }
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<PortalCore>,
}

impl AxumContext {
    pub fn new(core: PortalCore) -> Self {
        Self {
            core: Arc::new(core),
        }
    }
}

/// Pick the mail transport. Without an API key, mail is disabled.
pub fn build_notifier(settings: &MailSettings) -> Result<Arc<dyn Notifier>> {
    match MailConfig::from_settings(settings) {
        Some(config) => {
            tracing::info!(sender = %config.sender_email(), "Email delivery enabled (Resend)");
            Ok(Arc::new(ResendNotifier::new(config)?))
        }
        None => {
            tracing::warn!("RESEND_API_KEY not configured, emails will be skipped");
            Ok(Arc::new(NoopNotifier::new()))
        }
    }
}

/// Open the database, prepare the upload root, seed the admin account and
/// assemble `PortalCore`.
pub async fn bootstrap(config: &PortalConfig) -> Result<AxumContext> {
    tracing::info!(
        database_path = %config.database_path.display(),
        upload_dir = %config.upload_dir.display(),
        "Portal bootstrap resolved paths"
    );

    let pool = setup_database(&config.database_path).await?;

    let store = ReportStore::new(&config.upload_dir);
    store.ensure_root().await?;

    let tokens = TokenIssuer::new(&config.secret_key, config.token_ttl());
    let notifier = build_notifier(&config.mail)?;
    let core = CoreFactory::build_portal_core(pool, tokens, store, notifier);

    let summary = core.seeder().run(&config.seed).await?;
    tracing::info!(
        companies_created = summary.companies_created,
        users_created = summary.users_created,
        "Startup seeding complete"
    );

    Ok(AxumContext::new(core))
}

/// Start the web server and run until Ctrl-C.
pub async fn start_server(config: &PortalConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let server = ServerConfig::from_portal(config);
    let ctx = bootstrap(config).await?;
    let app = crate::routes::create_router(ctx, &server.cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("InsightPlace portal API listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
