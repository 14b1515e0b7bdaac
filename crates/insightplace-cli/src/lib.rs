//! Command-line adapter for the InsightPlace client portal.
//!
//! The `insightplace` binary runs the HTTP server and the operator tasks that
//! have no HTTP surface: seeding, creating tenants and accounts, hashing
//! passwords for manual database fixes.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use chrono as _;
#[cfg(test)]
use tempfile as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
