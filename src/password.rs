//! Password Hashing
//!
//! bcrypt helpers used when provisioning accounts and when evaluating login
//! attempts. bcrypt embeds a per-hash salt and compares in constant time, so
//! verification leaks nothing through timing.

use std::fmt;

use bcrypt::{hash, verify};

/// bcrypt work factor for new credentials (recommended as of 2024)
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// bcrypt silently truncates input beyond 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Failure to hash a new credential.
#[derive(Debug)]
pub enum PasswordError {
    /// Password exceeds the bcrypt input limit
    TooLong,
    /// bcrypt rejected the input or cost factor
    Hashing(String),
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong => {
                write!(f, "password exceeds {} bytes", MAX_PASSWORD_BYTES)
            }
            Self::Hashing(detail) => write!(f, "password hashing failed: {}", detail),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Hash a password with bcrypt at the given cost factor.
///
/// Rejects input longer than 72 bytes instead of letting bcrypt truncate it.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }
    hash(password, cost).map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a password against a stored bcrypt hash.
///
/// A malformed hash verifies as `false` rather than erroring, so a corrupted
/// record behaves like a wrong password instead of leaking store internals.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the suite fast; production uses cost 12
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash_password("correct horse battery staple", TEST_COST).unwrap();

        assert!(verify_password("correct horse battery staple", &hashed));
        assert!(!verify_password("correct horse battery stable", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password", TEST_COST).unwrap();
        let b = hash_password("same-password", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_oversized_password() {
        let long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(
            hash_password(&long, TEST_COST),
            Err(PasswordError::TooLong)
        ));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }
}
