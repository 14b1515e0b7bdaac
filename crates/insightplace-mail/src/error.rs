//! Error types for email delivery.

use insightplace_core::NotificationError;
use thiserror::Error;

pub type MailResult<T> = Result<T, MailError>;

#[derive(Debug, Error)]
pub enum MailError {
    /// The provider answered with a non-success status.
    #[error("Email provider rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered 2xx with a body we could not read.
    #[error("Invalid response from email provider: {0}")]
    InvalidResponse(String),
}

impl From<MailError> for NotificationError {
    fn from(err: MailError) -> Self {
        Self::Delivery(err.to_string())
    }
}
