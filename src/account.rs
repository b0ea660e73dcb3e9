//! User Account Model
//!
//! The persisted account record tracked by the lockout state machine, and the
//! public identity returned to callers on successful authentication.
//!
//! An account is in exactly one of two states, derived from its fields:
//! - **Unlocked**: `locked_until` is absent or in the past
//! - **Locked**: `locked_until` is in the future
//!
//! Only [`AuthCore`](crate::AuthCore) mutates `failed_login_attempts` and
//! `locked_until`; account creation and deletion happen out of band
//! (seed/admin provisioning).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A stored user account.
///
/// `password_hash` is a bcrypt hash and is never exposed through [`Identity`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct UserAccount {
    /// Immutable unique identifier
    pub id: Uuid,

    /// Unique login name, case-sensitive as stored
    pub username: String,

    /// Contact email for the account
    pub email: String,

    /// One-way bcrypt hash of the credential
    pub password_hash: String,

    /// Consecutive failed login attempts; reset to 0 on success or lock expiry
    pub failed_login_attempts: i32,

    /// When present and in the future, the account is locked
    pub locked_until: Option<DateTime<Utc>>,

    /// Disabled accounts fail login identically to missing accounts
    pub is_active: bool,

    /// Role names granted to the account
    pub roles: Vec<String>,
}

impl UserAccount {
    /// Create a fresh, unlocked account.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            failed_login_attempts: 0,
            locked_until: None,
            is_active: true,
            roles: Vec::new(),
        }
    }

    /// Builder: grant a role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Check whether the account is locked as of `now`.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        matches!(self.locked_until, Some(until) if until > now)
    }

    /// Check whether a previously set lock has expired as of `now`.
    ///
    /// Distinct from "not locked": an expired lock still carries a stale
    /// `locked_until` value that must be cleared before the next evaluation.
    pub fn lock_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.locked_until, Some(until) if until <= now)
    }

    /// The public view of this account, safe to return to callers.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// Public identity of an authenticated account.
///
/// Carries no credential material; owned by the caller after a successful
/// login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Account identifier (JWT `sub`)
    pub id: Uuid,
    /// Login name
    pub username: String,
    /// Granted role names
    pub roles: Vec<String>,
}

impl Identity {
    /// Check if the identity has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fresh_account_is_unlocked() {
        let account = UserAccount::new("alice", "alice@example.com", "$2b$12$hash");
        let now = Utc::now();

        assert!(!account.is_locked(now));
        assert!(!account.lock_expired(now));
        assert_eq!(account.failed_login_attempts, 0);
        assert!(account.is_active);
    }

    #[test]
    fn test_future_lock_is_locked() {
        let mut account = UserAccount::new("alice", "alice@example.com", "$2b$12$hash");
        let now = Utc::now();
        account.locked_until = Some(now + Duration::minutes(15));

        assert!(account.is_locked(now));
        assert!(!account.lock_expired(now));
    }

    #[test]
    fn test_past_lock_is_expired_not_locked() {
        let mut account = UserAccount::new("alice", "alice@example.com", "$2b$12$hash");
        let now = Utc::now();
        account.locked_until = Some(now - Duration::seconds(1));

        assert!(!account.is_locked(now));
        assert!(account.lock_expired(now));
    }

    #[test]
    fn test_identity_excludes_credentials() {
        let account = UserAccount::new("alice", "alice@example.com", "$2b$12$hash")
            .with_role("admin");
        let identity = account.identity();

        assert_eq!(identity.id, account.id);
        assert_eq!(identity.username, "alice");
        assert!(identity.has_role("admin"));
        assert!(!identity.has_role("superadmin"));
    }
}
