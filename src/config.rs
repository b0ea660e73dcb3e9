//! Authentication Configuration
//!
//! Explicit configuration for the lockout state machine and session issuance.
//! There are no ambient singletons: construct an [`AuthConfig`] and pass it to
//! [`AuthCore`](crate::AuthCore).
//!
//! # Defaults
//!
//! - 5 failed attempts before lockout
//! - 15 minute lockout window
//! - 1 hour session expiry
//! - bcrypt cost factor 12

use std::time::Duration;

use crate::parse::parse_duration;

/// Configuration for [`AuthCore`](crate::AuthCore).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Failed attempts that trigger a lockout
    pub max_failed_attempts: u32,

    /// How long an account stays locked after the threshold is reached
    pub lock_duration: Duration,

    /// Lifetime of issued session credentials
    pub session_expiry: Duration,

    /// bcrypt work factor for hashing new credentials
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lock_duration: Duration::from_secs(15 * 60),
            session_expiry: Duration::from_secs(60 * 60),
            bcrypt_cost: 12,
        }
    }
}

impl AuthConfig {
    /// Create a new builder for programmatic configuration.
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_MAX_FAILED_ATTEMPTS`: attempts before lockout (default: 5)
    /// - `AUTH_LOCK_DURATION`: lockout window, e.g. "15m" (default: 15m)
    /// - `AUTH_SESSION_EXPIRY`: session lifetime, e.g. "1h" (default: 1h)
    /// - `AUTH_BCRYPT_COST`: bcrypt work factor (default: 12)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_failed_attempts = std::env::var("AUTH_MAX_FAILED_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_failed_attempts);

        let lock_duration = std::env::var("AUTH_LOCK_DURATION")
            .map(|s| parse_duration(&s, defaults.lock_duration))
            .unwrap_or(defaults.lock_duration);

        let session_expiry = std::env::var("AUTH_SESSION_EXPIRY")
            .map(|s| parse_duration(&s, defaults.session_expiry))
            .unwrap_or(defaults.session_expiry);

        let bcrypt_cost = std::env::var("AUTH_BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.bcrypt_cost);

        Self {
            max_failed_attempts,
            lock_duration,
            session_expiry,
            bcrypt_cost,
        }
    }
}

/// Builder for [`AuthConfig`]
#[derive(Debug, Clone, Default)]
pub struct AuthConfigBuilder {
    config: AuthConfig,
}

impl AuthConfigBuilder {
    /// Set the failed-attempt threshold
    pub fn max_failed_attempts(mut self, attempts: u32) -> Self {
        self.config.max_failed_attempts = attempts;
        self
    }

    /// Set the lockout duration
    pub fn lock_duration(mut self, duration: Duration) -> Self {
        self.config.lock_duration = duration;
        self
    }

    /// Set the session credential lifetime
    pub fn session_expiry(mut self, expiry: Duration) -> Self {
        self.config.session_expiry = expiry;
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AuthConfig {
        self.config
    }
}
