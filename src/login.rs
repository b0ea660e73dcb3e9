//! Login Evaluation and Account Lockout
//!
//! The lockout state machine. An account is `Unlocked` when `locked_until` is
//! absent or in the past, `Locked` when it is in the future. Every transition
//! happens inside [`AuthCore::attempt_login`]:
//!
//! - Wrong password increments `failed_login_attempts`; reaching the
//!   configured threshold sets `locked_until = now + lock_duration`. The
//!   locking attempt itself still reports invalid credentials; only the next
//!   attempt inside the window reports a locked account.
//! - While locked, every attempt fails with [`AuthError::AccountLocked`]
//!   before any password comparison, and nothing is persisted.
//! - Once the window has elapsed, the next attempt first clears the lock and
//!   resets the counter, then evaluates the password against the now-unlocked
//!   account.
//! - Success from any dirty state resets the counter and clears the lock.
//!
//! Unknown usernames, inactive accounts, and wrong passwords all surface the
//! same [`AuthError::InvalidCredentials`] so callers cannot enumerate valid
//! usernames.
//!
//! # Usage
//!
//! ```ignore
//! use wicket::{AuthConfig, AuthCore, JwtIssuer, MemoryUserStore};
//!
//! let core = AuthCore::new(store, issuer, AuthConfig::default());
//!
//! match core.login("alice", password).await {
//!     Ok(session) => println!("token: {}", session.token),
//!     Err(e) => eprintln!("login failed: {}", e),
//! }
//! ```

use chrono::Utc;

use crate::account::Identity;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::events::SecurityEvent;
use crate::password::{hash_password, verify_password, PasswordError};
use crate::security_event;
use crate::store::{StoreError, UserStore};
use crate::token::{SessionClaims, TokenIssuer};

/// A successfully issued session: the authenticated identity plus the signed
/// bearer credential. Not persisted; owned by the caller.
#[derive(Debug, Clone)]
pub struct Session {
    /// Who authenticated
    pub identity: Identity,
    /// Opaque signed credential for subsequent bearer authentication
    pub token: String,
}

/// Credential evaluation, lockout enforcement, and session issuance.
///
/// Generic over its two collaborators so the state machine is testable with
/// in-memory doubles and deployable against Postgres and JWTs unchanged.
pub struct AuthCore<S, T> {
    store: S,
    issuer: T,
    config: AuthConfig,
}

impl<S, T> AuthCore<S, T>
where
    S: UserStore,
    T: TokenIssuer,
{
    /// Create a core over a user store and token issuer.
    pub fn new(store: S, issuer: T, config: AuthConfig) -> Self {
        Self {
            store,
            issuer,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Evaluate a login attempt and return the authenticated identity.
    ///
    /// This is the only place account lockout state is mutated. The returned
    /// [`Identity`] carries no credential material.
    pub async fn attempt_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let account = self
            .store
            .find_by_username(username)
            .await
            .map_err(|e| self.storage_failure(username, e))?;

        // Unknown user: same failure as a wrong password, nothing to persist
        let Some(mut account) = account else {
            log_login_failure(username, "unknown_username");
            return Err(AuthError::InvalidCredentials);
        };

        if !account.is_active {
            log_login_failure(username, "inactive_account");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();

        // Locked: refuse before any password comparison, persist nothing
        if account.is_locked(now) {
            security_event!(
                SecurityEvent::AuthenticationFailure,
                username = %username,
                reason = "account_locked",
                "Login attempt blocked while account is locked"
            );
            return Err(AuthError::AccountLocked);
        }

        // Expired lock: clear it and reset the counter before evaluating
        if account.lock_expired(now) {
            account.locked_until = None;
            account.failed_login_attempts = 0;
            self.store
                .save(&account)
                .await
                .map_err(|e| self.storage_failure(username, e))?;
            security_event!(
                SecurityEvent::AccountUnlocked,
                username = %username,
                "Lockout window elapsed, account unlocked"
            );
        }

        if !verify_password(password, &account.password_hash) {
            account.failed_login_attempts += 1;

            let threshold = self.config.max_failed_attempts as i32;
            if account.failed_login_attempts >= threshold {
                account.locked_until = Some(now + self.config.lock_duration);
                security_event!(
                    SecurityEvent::AccountLocked,
                    username = %username,
                    failed_attempts = account.failed_login_attempts,
                    "Account locked after repeated failed logins"
                );
            }

            self.store
                .save(&account)
                .await
                .map_err(|e| self.storage_failure(username, e))?;

            // The attempt that triggers the lock still reports invalid
            // credentials; the lock only gates subsequent attempts.
            log_login_failure(username, "invalid_password");
            return Err(AuthError::InvalidCredentials);
        }

        // Success: clear any residue from earlier failures
        if account.failed_login_attempts > 0 || account.locked_until.is_some() {
            account.failed_login_attempts = 0;
            account.locked_until = None;
            self.store
                .save(&account)
                .await
                .map_err(|e| self.storage_failure(username, e))?;
        }

        let identity = account.identity();
        security_event!(
            SecurityEvent::AuthenticationSuccess,
            user_id = %identity.id,
            username = %identity.username,
            "User authenticated successfully"
        );
        Ok(identity)
    }

    /// Sign a session credential for an already-authenticated identity.
    ///
    /// Never touches the user store: issuing a session cannot change lockout
    /// state.
    pub fn issue_session(&self, identity: &Identity) -> Result<Session, AuthError> {
        let claims = SessionClaims {
            sub: identity.id.to_string(),
            username: identity.username.clone(),
        };
        let token = self.issuer.sign(&claims, self.config.session_expiry)?;

        security_event!(
            SecurityEvent::SessionIssued,
            user_id = %identity.id,
            username = %identity.username,
            expiry_secs = self.config.session_expiry.as_secs(),
            "Session credential issued"
        );

        Ok(Session {
            identity: identity.clone(),
            token,
        })
    }

    /// Evaluate credentials and, on success, issue a session in one call.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let identity = self.attempt_login(username, password).await?;
        self.issue_session(&identity)
    }

    /// Hash a new credential at the configured cost factor.
    ///
    /// For provisioning and password-change flows; login never hashes.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        hash_password(password, self.config.bcrypt_cost)
    }

    fn storage_failure(&self, username: &str, e: StoreError) -> AuthError {
        security_event!(
            SecurityEvent::StorageFailure,
            username = %username,
            error = %e,
            "User store failed during login evaluation"
        );
        AuthError::Storage(e)
    }
}

fn log_login_failure(username: &str, reason: &'static str) {
    security_event!(
        SecurityEvent::AuthenticationFailure,
        username = %username,
        reason = reason,
        "Authentication failed"
    );
}
