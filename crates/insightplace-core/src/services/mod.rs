//! Application services.
//!
//! Services hold repository handles and enforce the portal's rules: tenant
//! scoping, admin-only operations and audit logging. They never see HTTP.

mod activity_log;
mod admin_service;
mod auth_service;
mod client_service;
mod portal_core;
mod seed;
mod status_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity_log::{ActivityLogger, MAX_ACTIVITY_LIMIT};
pub use admin_service::{AdminService, ReportUpload, UploadOutcome};
pub use auth_service::{AuthService, LoginOutcome};
pub use client_service::{ClientService, ReportFile};
pub use portal_core::PortalCore;
pub use seed::{ADMIN_COMPANY_NAME, DEMO_COMPANY_NAME, DEMO_USER_EMAIL, SeedSummary, Seeder};
pub use status_service::{STATUS_LIST_LIMIT, StatusService};
