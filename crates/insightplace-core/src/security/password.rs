//! bcrypt password hashing.

use super::SecurityError;

/// Lowest work factor bcrypt accepts.
const MIN_COST: u32 = 4;

/// Hashes and verifies account passwords.
///
/// Hashes use the `$2b$` bcrypt format, so accounts created by earlier
/// deployments keep working.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Create a hasher with an explicit work factor (4..=31).
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Lowest accepted work factor. Only suitable for tests.
    pub const fn fast() -> Self {
        Self::with_cost(MIN_COST)
    }

    pub fn hash(&self, password: &str) -> Result<String, SecurityError> {
        bcrypt::hash(password, self.cost).map_err(|e| SecurityError::Hashing(e.to_string()))
    }

    /// Check `password` against `hash`. A malformed hash counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not valid bcrypt");
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_async(&self, password: String) -> Result<String, SecurityError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| SecurityError::Hashing(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking pool.
    pub async fn verify_async(&self, password: String, hash: String) -> bool {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::fast();
        let hash = hasher.hash("admin123").unwrap();
        assert!(hash.starts_with("$2b$04$"));
        assert!(hasher.verify("admin123", &hash));
        assert!(!hasher.verify("admin124", &hash));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!PasswordHasher::fast().verify("anything", "not-a-hash"));
    }

    #[tokio::test]
    async fn async_variants_agree_with_sync() {
        let hasher = PasswordHasher::fast();
        let hash = hasher.hash_async("pw".to_string()).await.unwrap();
        assert!(hasher.verify_async("pw".to_string(), hash.clone()).await);
        assert!(!hasher.verify_async("nope".to_string(), hash).await);
    }
}
