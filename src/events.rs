//! Security Event Logging
//!
//! Structured logging for the security-relevant events this crate emits.
//! Every event carries a stable name, a category for filtering, and a
//! severity that selects the tracing level.
//!
//! # Usage
//!
//! ```ignore
//! use wicket::events::{SecurityEvent, security_event};
//!
//! security_event!(
//!     SecurityEvent::AuthenticationSuccess,
//!     user_id = %identity.id,
//!     username = %identity.username,
//!     "User authenticated successfully"
//! );
//!
//! security_event!(
//!     SecurityEvent::AuthenticationFailure,
//!     username = %username,
//!     reason = "invalid_password",
//!     "Authentication failed"
//! );
//! ```

use std::fmt;

/// Security events emitted by the authentication core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityEvent {
    /// Successful user authentication
    AuthenticationSuccess,
    /// Failed authentication attempt
    AuthenticationFailure,
    /// Session credential issued
    SessionIssued,

    /// Account locked after repeated failures
    AccountLocked,
    /// Expired lock cleared, account usable again
    AccountUnlocked,

    /// New account provisioned (seed/admin tooling)
    UserProvisioned,

    /// User store lookup or persist failed
    StorageFailure,
}

impl SecurityEvent {
    /// Get the event category for filtering/grouping
    pub fn category(&self) -> &'static str {
        match self {
            Self::AuthenticationSuccess
            | Self::AuthenticationFailure
            | Self::SessionIssued => "authentication",

            Self::AccountLocked | Self::AccountUnlocked => "security",

            Self::UserProvisioned => "user_management",

            Self::StorageFailure => "system",
        }
    }

    /// Get the severity level for the event
    pub fn severity(&self) -> Severity {
        match self {
            Self::StorageFailure => Severity::Critical,

            Self::AuthenticationFailure | Self::AccountLocked => Severity::High,

            Self::AuthenticationSuccess
            | Self::AccountUnlocked
            | Self::UserProvisioned => Severity::Medium,

            Self::SessionIssued => Severity::Low,
        }
    }

    /// Get the event name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthenticationSuccess => "authentication_success",
            Self::AuthenticationFailure => "authentication_failure",
            Self::SessionIssued => "session_issued",
            Self::AccountLocked => "account_locked",
            Self::AccountUnlocked => "account_unlocked",
            Self::UserProvisioned => "user_provisioned",
            Self::StorageFailure => "storage_failure",
        }
    }
}

impl fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Event severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Routine operations
    Low,
    /// Important state changes
    Medium,
    /// Security-relevant failures
    High,
    /// Immediate attention required
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Log a security event with structured fields.
///
/// The macro automatically includes:
/// - `security_event`: Event type name
/// - `category`: Event category
/// - `severity`: Event severity level
///
/// and dispatches to the tracing level matching the severity.
///
/// # Examples
///
/// ```ignore
/// security_event!(
///     SecurityEvent::AccountLocked,
///     username = %username,
///     failed_attempts = attempts,
///     "Account locked after repeated failures"
/// );
/// ```
#[macro_export]
macro_rules! security_event {
    ($event:expr, $($field:tt)*) => {{
        let event = $event;
        let severity = event.severity();
        let category = event.category();
        let event_name = event.name();

        match severity {
            $crate::events::Severity::Critical => {
                ::tracing::error!(
                    security_event = event_name,
                    category = category,
                    severity = "critical",
                    $($field)*
                );
            }
            $crate::events::Severity::High => {
                ::tracing::warn!(
                    security_event = event_name,
                    category = category,
                    severity = "high",
                    $($field)*
                );
            }
            $crate::events::Severity::Medium => {
                ::tracing::info!(
                    security_event = event_name,
                    category = category,
                    severity = "medium",
                    $($field)*
                );
            }
            $crate::events::Severity::Low => {
                ::tracing::debug!(
                    security_event = event_name,
                    category = category,
                    severity = "low",
                    $($field)*
                );
            }
        }
    }};
}

pub use security_event;
