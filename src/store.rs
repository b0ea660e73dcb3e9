//! User Store Abstraction
//!
//! [`AuthCore`](crate::AuthCore) reads and persists accounts only through the
//! [`UserStore`] trait, so the lockout state machine is testable without a
//! database and deployable against one.
//!
//! The crate ships two implementations:
//! - [`MemoryUserStore`]: in-process `HashMap` keyed by username, suitable for
//!   tests and single-node tools
//! - `PgUserStore` (behind the `postgres` feature): sqlx-backed store
//!
//! # Usage
//!
//! ```ignore
//! use wicket::{MemoryUserStore, UserAccount, UserStore};
//!
//! let store = MemoryUserStore::new();
//! store.save(&UserAccount::new("alice", "alice@example.com", hash)).await?;
//! let found = store.find_by_username("alice").await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::account::UserAccount;

/// Failure to look up or persist an account.
///
/// Deliberately opaque: callers (and end users) only learn that the store is
/// unavailable, never which query failed.
#[derive(Debug)]
pub enum StoreError {
    /// The backing store could not serve the request
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(detail) => write!(f, "store unavailable: {}", detail),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence seam for user accounts.
///
/// Implementations must treat `save` as an upsert keyed by account id: the
/// lockout state machine persists counter and lock mutations through it, and
/// provisioning tools persist new accounts through it.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an account by its unique username.
    ///
    /// `Ok(None)` means no such account; it is not an error.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError>;

    /// Persist the account, replacing any existing record with the same id.
    async fn save(&self, account: &UserAccount) -> Result<(), StoreError>;
}

/// In-memory user store keyed by username.
///
/// Cloning is cheap and all clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    accounts: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Unavailable("account map poisoned".into()))?;
        Ok(accounts.get(username).cloned())
    }

    async fn save(&self, account: &UserAccount) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Unavailable("account map poisoned".into()))?;
        accounts.insert(account.username.clone(), account.clone());
        Ok(())
    }
}
