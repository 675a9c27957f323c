// src/auth/password.rs
use crate::errors::ServerError;

pub const MIN_PASSWORD_CHARS: usize = 8;

pub fn hash_password(password: &str, cost: u32) -> Result<String, ServerError> {
    bcrypt::hash(password, cost).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ServerError::InternalError
    })
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
