//! Transactional email for the InsightPlace client portal.
//!
//! [`ResendNotifier`] implements the core `Notifier` port on top of the Resend
//! HTTP API. Messages are rendered from the HTML templates in [`templates`].

mod client;
mod config;
mod error;
pub mod templates;

pub use client::ResendNotifier;
pub use config::{DEFAULT_API_BASE, MailConfig};
pub use error::{MailError, MailResult};
