//! Core domain, ports and services of the InsightPlace client portal.
//!
//! The portal lets InsightPlace administrators publish confidential reports to
//! client companies. Clients only ever see published reports of their own
//! company; every access is written to an audit trail.
//!
//! This crate has no HTTP or SQL dependencies. Adapters provide repository
//! implementations (`insightplace-db`), email delivery (`insightplace-mail`)
//! and the web surface (`insightplace-axum`).

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod security;
pub mod services;
pub mod storage;

pub use config::{ConfigError, MailSettings, PortalConfig, SeedSettings};
pub use domain::{
    ActivityFilter, ActivityLog, ActivityType, ClientInfo, Company, DashboardStats, NewActivity,
    NewCompany, NewReport, NewStatusCheck, NewUser, Report, ReportStatus, ReportUpdate,
    StatusCheck, User, UserResponse, UserRole, UserUpdate,
};
pub use ports::{
    ActivityRepository, CompanyRepository, CoreError, NoopNotifier, NotificationError, Notifier,
    ReportNotice, ReportRepository, Repos, RepositoryError, StatusCheckRepository, UserRepository,
    WelcomeNotice,
};
pub use security::{AccessToken, Claims, PasswordHasher, SecurityError, TokenIssuer};
pub use services::{
    AdminService, AuthService, ClientService, LoginOutcome, PortalCore, ReportFile, ReportUpload,
    SeedSummary, Seeder, StatusService, UploadOutcome,
};
pub use storage::{
    ALLOWED_FILE_TYPES, ReportStore, StorageError, StoredFiles, UploadedFile, format_file_size,
    sanitize_filename,
};
