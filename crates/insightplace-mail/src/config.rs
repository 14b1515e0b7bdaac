//! Configuration for the Resend client.

use std::time::Duration;

use insightplace_core::MailSettings;
use secrecy::SecretString;

/// Base URL of the Resend HTTP API.
pub const DEFAULT_API_BASE: &str = "https://api.resend.com";

/// Settings for [`ResendNotifier`](crate::ResendNotifier).
///
/// # Example
///
/// ```
/// use insightplace_mail::MailConfig;
/// use std::time::Duration;
///
/// let config = MailConfig::new("re_123".to_string().into(), "contacto@insight-place.com")
///     .with_portal_url("https://portal.insight-place.com")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.portal_url(), "https://portal.insight-place.com");
/// ```
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub(crate) api_base: String,
    pub(crate) api_key: SecretString,
    pub(crate) sender_email: String,
    pub(crate) portal_url: String,
    pub(crate) timeout: Duration,
}

impl MailConfig {
    pub fn new(api_key: SecretString, sender_email: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            sender_email: sender_email.into(),
            portal_url: insightplace_core::config::DEFAULT_PORTAL_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build from portal settings. `None` when no API key is configured.
    pub fn from_settings(settings: &MailSettings) -> Option<Self> {
        let key = settings.api_key.clone()?;
        Some(Self::new(key, settings.sender_email.clone()).with_portal_url(&settings.portal_url))
    }

    /// Override the API base URL. Used to point at a test double.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_portal_url(mut self, url: impl Into<String>) -> Self {
        self.portal_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn sender_email(&self) -> &str {
        &self.sender_email
    }

    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    pub(crate) fn emails_endpoint(&self) -> String {
        format!("{}/emails", self.api_base)
    }
}
