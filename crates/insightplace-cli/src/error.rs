//! CLI error type and the mapping from core errors to exit codes.

use insightplace_core::{ConfigError, CoreError, RepositoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Invalid arguments or rejected input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// File storage failure.
    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Exit code following sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT
        }
    }

    /// Exit code for any error bubbled up to `main`.
    pub fn exit_code_for(err: &anyhow::Error) -> i32 {
        err.downcast_ref::<Self>().map_or(1, Self::exit_code)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::AlreadyExists(msg)) => Self::Arguments(msg),
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Validation(msg) | CoreError::NotFound(msg) => Self::Arguments(msg),
            CoreError::Storage(msg) => Self::Io(msg),
            CoreError::ExternalService(msg) => Self::Core(format!("External service: {msg}")),
            CoreError::Unauthorized(msg) | CoreError::Forbidden(msg) | CoreError::Internal(msg) => {
                Self::Core(msg)
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
