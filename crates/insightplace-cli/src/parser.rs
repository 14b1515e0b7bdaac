//! Root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;
use insightplace_core::PortalConfig;

use crate::commands::Commands;

/// Command-line interface for the InsightPlace client portal.
///
/// Configuration comes from the environment (and `.env`); the global flags
/// below override it for a single invocation.
#[derive(Parser)]
#[command(name = "insightplace")]
#[command(about = "Run and administer the InsightPlace client portal")]
#[command(version)]
pub struct Cli {
    /// SQLite database file
    #[arg(long = "database-path", global = true)]
    pub database_path: Option<PathBuf>,

    /// Root directory for uploaded report files
    #[arg(long = "upload-dir", global = true)]
    pub upload_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply flag overrides on top of the environment configuration.
    pub fn apply_overrides(&self, config: &mut PortalConfig) {
        if let Some(path) = &self.database_path {
            config.database_path.clone_from(path);
        }
        if let Some(dir) = &self.upload_dir {
            config.upload_dir.clone_from(dir);
        }
        match &self.command {
            Commands::Serve { port: Some(port) } => config.port = *port,
            Commands::Seed { demo: true } => config.seed.demo_data = true,
            _ => {}
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
