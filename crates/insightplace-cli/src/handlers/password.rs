//! Hash-password command handler.

use anyhow::Result;
use insightplace_core::PasswordHasher;

use crate::error::CliError;

/// bcrypt hash of `password`, suitable for the `users.hashed_password` column.
pub fn hash(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(CliError::Arguments("Password must not be empty".to_string()).into());
    }
    Ok(PasswordHasher::default()
        .hash(password)
        .map_err(|e| CliError::Core(e.to_string()))?)
}

pub fn execute(password: &str) -> Result<()> {
    println!("{}", hash(password)?);
    Ok(())
}
