//! Resend API client implementing the `Notifier` port.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use insightplace_core::{NotificationError, Notifier, ReportNotice, WelcomeNotice};

use crate::config::MailConfig;
use crate::error::{MailError, MailResult};
use crate::templates;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Delivers portal emails through Resend.
pub struct ResendNotifier {
    client: reqwest::Client,
    config: MailConfig,
}

impl ResendNotifier {
    pub fn new(config: MailConfig) -> MailResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &MailConfig {
        &self.config
    }

    /// Send one email and return the provider's message id.
    pub async fn send(&self, recipient: &str, subject: &str, html: &str) -> MailResult<String> {
        let body = SendEmailRequest {
            from: &self.config.sender_email,
            to: [recipient],
            subject,
            html,
        };

        let response = self
            .client
            .post(self.config.emails_endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%recipient, status = status.as_u16(), "Failed to send email");
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| MailError::InvalidResponse(e.to_string()))?;
        tracing::info!(%recipient, email_id = %sent.id, "Email sent");
        Ok(sent.id)
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn welcome_user(&self, notice: &WelcomeNotice) -> Result<(), NotificationError> {
        let html = templates::welcome_email_html(
            &notice.full_name,
            &notice.email,
            &notice.password,
            &self.config.portal_url,
        );
        self.send(&notice.email, templates::WELCOME_SUBJECT, &html)
            .await?;
        Ok(())
    }

    async fn report_published(&self, notice: &ReportNotice) -> Result<(), NotificationError> {
        let html = templates::new_report_email_html(
            &notice.recipient_name,
            &notice.report_title,
            &notice.company_name,
            &self.config.portal_url,
        );
        let subject = templates::new_report_subject(&notice.report_title);
        self.send(&notice.recipient_email, &subject, &html).await?;
        Ok(())
    }
}
