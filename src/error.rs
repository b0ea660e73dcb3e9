//! Authentication Error Taxonomy
//!
//! Every fallible operation in this crate returns a tagged result; there is no
//! cross-cutting catch-and-rethrow layer. Failure kinds follow a strict
//! anti-enumeration policy:
//!
//! - [`AuthError::InvalidCredentials`] covers both "no such user" and "wrong
//!   password" with an identical message, so callers cannot discover valid
//!   usernames from the failure shape.
//! - [`AuthError::AccountLocked`] never reveals remaining attempts or the
//!   exact unlock time.
//! - Storage and token-signing faults propagate unmodified; this crate never
//!   retries them.

use std::fmt;

use crate::store::StoreError;
use crate::token::TokenError;

/// Failure kinds surfaced by [`AuthCore`](crate::AuthCore).
#[derive(Debug)]
pub enum AuthError {
    /// Unknown username or wrong password (indistinguishable by design)
    InvalidCredentials,
    /// The account is locked and the lockout window has not elapsed
    AccountLocked,
    /// The user store failed to look up or persist an account
    Storage(StoreError),
    /// The token issuer failed to sign a session credential
    Token(TokenError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::AccountLocked => {
                write!(f, "Account temporarily locked. Try again later.")
            }
            Self::Storage(e) => write!(f, "User store unavailable: {}", e),
            Self::Token(e) => write!(f, "Session issuance failed: {}", e),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Token(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        Self::Storage(e)
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        Self::Token(e)
    }
}

impl AuthError {
    /// Stable kind name for structured logging and API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::AccountLocked => "account_locked",
            Self::Storage(_) => "storage_unavailable",
            Self::Token(_) => "token_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_message_reveals_nothing() {
        let msg = AuthError::AccountLocked.to_string();
        // No attempt counts or timestamps in the user-visible message
        assert!(!msg.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AuthError::InvalidCredentials.kind(), "invalid_credentials");
        assert_eq!(AuthError::AccountLocked.kind(), "account_locked");
        assert_eq!(
            AuthError::Storage(StoreError::Unavailable("down".into())).kind(),
            "storage_unavailable"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err = AuthError::Storage(StoreError::Unavailable("connection refused".into()));
        assert!(err.source().is_some());
        assert!(AuthError::InvalidCredentials.source().is_none());
    }
}
