use crate::error::AppError;

/// One-way password hashing with a configurable bcrypt cost factor.
///
/// The cost is fixed at startup from configuration; one instance is shared
/// across all requests.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password. A failure here means the cost parameter or
    /// the underlying primitive is misconfigured, not that the input was bad.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// A malformed stored hash counts as a failed verification rather than an
    /// error.
    pub fn verify(&self, password: &str, hashed: &str) -> bool {
        bcrypt::verify(password, hashed).unwrap_or(false)
    }
}
