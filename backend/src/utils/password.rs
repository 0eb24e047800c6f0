//! Password hashing and verification.
//!
//! Uses bcrypt: adaptive cost and a fresh random salt per hash, embedded in
//! the self-describing hash string. A bare unsalted digest is not an
//! acceptable substitute here; it would leave stored hashes open to offline
//! precomputation attacks.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a raw password for storage.
///
/// Each call salts independently, so hashing the same password twice yields
/// two different strings that both verify against it. Only fails on a
/// catastrophic internal error.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ServiceError::internal_error("Password hashing failed")
    })
}

/// Verifies a raw password against a stored hash.
///
/// Returns `false` for a mismatch, a malformed hash, or empty input; a wrong
/// password is never an error. The comparison inside bcrypt is constant-time.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    if password.is_empty() || stored_hash.is_empty() {
        return false;
    }
    verify(password, stored_hash).unwrap_or(false)
}
