//! Credential handling: password hashes and access tokens.

mod password;
mod token;

use thiserror::Error;

pub use password::PasswordHasher;
pub use token::{AccessToken, Claims, TokenIssuer};

/// Errors from hashing or token handling.
#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
