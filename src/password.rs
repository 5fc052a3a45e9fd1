//! One-way salted password hashing. Hashing happens at persistence time in
//! the store layer, never in request handlers; verification happens at login.

use anyhow::{Context, Result};
use bcrypt::DEFAULT_COST;

/// Hashes a plaintext password with a per-hash random salt.
pub fn hash(password: &str) -> Result<String> {
    bcrypt::hash(password, DEFAULT_COST).context("failed to hash password")
}

/// Verifies a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
/// malformed.
pub fn verify(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).context("failed to verify password")
}
