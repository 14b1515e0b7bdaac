//! Notification port for transactional email.
//!
//! The core only states *what* happened (an account was created, a report was
//! published). Adapters decide how the message is rendered and delivered.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a notification transport.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The transport is not configured (e.g., missing API key).
    #[error("Notifications disabled: {0}")]
    Disabled(String),

    /// The provider rejected or failed to deliver the message.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// A freshly created account, including the initial plaintext password.
#[derive(Debug, Clone)]
pub struct WelcomeNotice {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// A report that became available to a company.
#[derive(Debug, Clone)]
pub struct ReportNotice {
    pub recipient_name: String,
    pub recipient_email: String,
    pub report_title: String,
    pub company_name: String,
}

/// Trait for delivering user-facing notifications.
///
/// # Implementations
///
/// - `NoopNotifier` - For tests and deployments without a mail provider
/// - `ResendNotifier` in `insightplace-mail`
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn welcome_user(&self, notice: &WelcomeNotice) -> Result<(), NotificationError>;

    async fn report_published(&self, notice: &ReportNotice) -> Result<(), NotificationError>;
}

/// A notifier that drops every message.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    async fn welcome_user(&self, notice: &WelcomeNotice) -> Result<(), NotificationError> {
        tracing::debug!(email = %notice.email, "Welcome email skipped (no notifier)");
        Ok(())
    }

    async fn report_published(&self, notice: &ReportNotice) -> Result<(), NotificationError> {
        tracing::debug!(
            email = %notice.recipient_email,
            report = %notice.report_title,
            "Report notification skipped (no notifier)"
        );
        Ok(())
    }
}
