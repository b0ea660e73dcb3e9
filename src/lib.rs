//! # Wicket
//!
//! Authentication core with account lockout for contact-form backends.
//!
//! The crate owns one thing: the login state machine. Failed attempts are
//! counted per account, the configured threshold triggers a timed lockout,
//! and a successful login issues a signed session credential. Persistence and
//! token signing sit behind traits so the machine runs identically against an
//! in-memory map in tests and PostgreSQL plus JWTs in production.
//!
//! ## Features
//!
//! - **Account Lockout**: configurable failed-attempt threshold and window
//! - **Anti-Enumeration**: unknown users and wrong passwords fail identically
//! - **Password Hashing**: bcrypt with per-hash salts, constant-time verify
//! - **Session Tokens**: HS256 JWTs with expiry and unique token ids
//! - **Input Validation**: email, phone, and postal-code parse functions
//! - **Security Events**: structured tracing for every auth-relevant event
//! - **PostgreSQL Store** (feature `postgres`): sqlx-backed user store
//!
//! ## Quick Start
//!
//! ```ignore
//! use wicket::{AuthConfig, AuthCore, AuthError, JwtIssuer, MemoryUserStore, UserAccount, UserStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryUserStore::new();
//!     let issuer = JwtIssuer::new(std::env::var("JWT_SECRET")?)?;
//!     let core = AuthCore::new(store.clone(), issuer, AuthConfig::from_env());
//!
//!     let hash = core.hash_password("hunter2hunter2")?;
//!     store.save(&UserAccount::new("alice", "alice@example.com", hash)).await?;
//!
//!     match core.login("alice", "hunter2hunter2").await {
//!         Ok(session) => println!("token: {}", session.token),
//!         Err(AuthError::AccountLocked) => eprintln!("locked out"),
//!         Err(e) => eprintln!("login failed: {}", e),
//!     }
//!     Ok(())
//! }
//! ```

mod account;
mod config;
#[cfg(feature = "postgres")]
pub mod database;
mod error;
pub mod events;
mod login;
mod parse;
mod password;
mod store;
mod token;
pub mod validation;

// Re-exports
pub use account::{Identity, UserAccount};
pub use config::{AuthConfig, AuthConfigBuilder};
pub use error::AuthError;
pub use login::{AuthCore, Session};
pub use parse::parse_duration;
pub use password::{hash_password, verify_password, PasswordError};
pub use store::{MemoryUserStore, StoreError, UserStore};
pub use token::{JwtIssuer, SessionClaims, TokenClaims, TokenError, TokenIssuer};

#[cfg(feature = "postgres")]
pub use database::{create_pool, health_check, DatabaseConfig, DatabaseError, PgUserStore, SslMode};
