//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, filesystem, HTTP).
//!
//! # Structure
//!
//! - `company` - Client organisations
//! - `user` - Portal accounts and roles
//! - `report` - Confidential reports and their visibility rules
//! - `activity` - Audit trail and dashboard counters
//! - `status` - Legacy status checks

pub mod activity;
pub mod company;
pub mod report;
pub mod status;
pub mod user;

pub use activity::{
    ActivityFilter, ActivityLog, ActivityType, ClientInfo, DEFAULT_ACTIVITY_LIMIT, DashboardStats,
    NewActivity,
};
pub use company::{Company, NewCompany};
pub use report::{NewReport, Report, ReportStatus, ReportUpdate, normalize_relative};
pub use status::{NewStatusCheck, StatusCheck};
pub use user::{NewUser, User, UserResponse, UserRole, UserUpdate, is_valid_email};
