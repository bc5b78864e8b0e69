use anyhow::{Context, Result};

/// bcrypt hasher for seeded credentials.
///
/// Hashes use the `$2b$` prefix, which the backend's Go bcrypt verifies.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Lowest cost bcrypt accepts; only for tests
    pub fn fast() -> Self {
        Self { cost: 4 }
    }

    /// Hash with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost).context("Failed to hash password")
    }
}
