//! PostgreSQL User Store
//!
//! Connection pooling plus the sqlx-backed [`UserStore`] implementation.
//! Available behind the `postgres` feature.
//!
//! # Usage
//!
//! ```ignore
//! use wicket::database::{create_pool, DatabaseConfig, PgUserStore};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = create_pool(&config).await?;
//! let store = PgUserStore::new(pool);
//! ```

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::account::UserAccount;
use crate::parse::parse_duration;
use crate::store::{StoreError, UserStore};

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL (from DATABASE_URL)
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections to maintain
    pub min_connections: u32,

    /// Maximum time to wait for a connection from the pool
    pub acquire_timeout: Duration,

    /// Maximum lifetime of a connection before it's closed
    pub max_lifetime: Duration,

    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,

    /// SSL mode for connections
    pub ssl_mode: SslMode,
}

/// SSL/TLS mode for database connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    /// Never use SSL (development only!)
    Disable,
    /// Use SSL if available, but don't require it
    Prefer,
    /// Require SSL connection
    Require,
    /// Require SSL and verify server certificate
    VerifyCa,
    /// Require SSL, verify certificate, and verify hostname
    VerifyFull,
}

impl Default for SslMode {
    fn default() -> Self {
        // Credentials travel over these connections; encrypt by default
        Self::Require
    }
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
            ssl_mode: SslMode::Require,
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection URL (required)
    /// - `DB_MAX_CONNECTIONS`: Max pool size (default: 10)
    /// - `DB_MIN_CONNECTIONS`: Min idle connections (default: 1)
    /// - `DB_ACQUIRE_TIMEOUT`: Connection acquire timeout (default: "30s")
    /// - `DB_MAX_LIFETIME`: Max connection lifetime (default: "30m")
    /// - `DB_IDLE_TIMEOUT`: Idle connection timeout (default: "10m")
    /// - `DB_SSL_MODE`: disable|prefer|require|verify-ca|verify-full (default: require)
    pub fn from_env() -> Result<Self, DatabaseError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::Configuration("DATABASE_URL environment variable must be set".into())
        })?;

        let defaults = Self::default();

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_connections);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_connections);

        let acquire_timeout = std::env::var("DB_ACQUIRE_TIMEOUT")
            .map(|s| parse_duration(&s, defaults.acquire_timeout))
            .unwrap_or(defaults.acquire_timeout);

        let max_lifetime = std::env::var("DB_MAX_LIFETIME")
            .map(|s| parse_duration(&s, defaults.max_lifetime))
            .unwrap_or(defaults.max_lifetime);

        let idle_timeout = std::env::var("DB_IDLE_TIMEOUT")
            .map(|s| parse_duration(&s, defaults.idle_timeout))
            .unwrap_or(defaults.idle_timeout);

        let ssl_mode = std::env::var("DB_SSL_MODE")
            .map(|s| SslMode::parse(&s))
            .unwrap_or(defaults.ssl_mode);

        Ok(Self {
            database_url,
            max_connections,
            min_connections,
            acquire_timeout,
            max_lifetime,
            idle_timeout,
            ssl_mode,
        })
    }

    /// Create a new builder for programmatic configuration.
    pub fn builder(database_url: impl Into<String>) -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::new(database_url)
    }

    /// Check if SSL is required for this configuration.
    pub fn requires_ssl(&self) -> bool {
        !matches!(self.ssl_mode, SslMode::Disable | SslMode::Prefer)
    }
}

impl SslMode {
    fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "disable" => Self::Disable,
            "prefer" => Self::Prefer,
            "require" => Self::Require,
            "verify-ca" | "verifyca" => Self::VerifyCa,
            "verify-full" | "verifyfull" => Self::VerifyFull,
            // Unknown values fall back to the secure default
            _ => Self::Require,
        }
    }
}

/// Builder for [`DatabaseConfig`]
#[derive(Debug, Clone)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    /// Create a new builder with the required database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            config: DatabaseConfig {
                database_url: database_url.into(),
                ..Default::default()
            },
        }
    }

    /// Set maximum connections (default: 10)
    pub fn max_connections(mut self, n: u32) -> Self {
        self.config.max_connections = n;
        self
    }

    /// Set minimum idle connections (default: 1)
    pub fn min_connections(mut self, n: u32) -> Self {
        self.config.min_connections = n;
        self
    }

    /// Set connection acquire timeout
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.config.acquire_timeout = timeout;
        self
    }

    /// Set SSL mode
    pub fn ssl_mode(mut self, mode: SslMode) -> Self {
        self.config.ssl_mode = mode;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}

/// Create a connection pool and verify it with a health check.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    info!(
        max_connections = config.max_connections,
        ssl_mode = ?config.ssl_mode,
        "Initializing database connection pool"
    );

    let connect_options = PgConnectOptions::from_str(&config.database_url)
        .map_err(|e| DatabaseError::Configuration(format!("Invalid DATABASE_URL: {}", e)))?
        .ssl_mode(config.ssl_mode.into());

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
        .map_err(|e| DatabaseError::Connection(format!("Failed to connect: {}", e)))?;

    health_check(&pool).await?;

    info!("Database connection pool initialized successfully");

    Ok(pool)
}

/// Verify the pool can execute a query, and report whether SSL is in use.
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    let result: (i32,) = sqlx::query_as("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DatabaseError::HealthCheck(format!("Query failed: {}", e)))?;

    if result.0 != 1 {
        return Err(DatabaseError::HealthCheck("Unexpected query result".into()));
    }

    let ssl_result: (bool,) = sqlx::query_as(
        "SELECT COALESCE((SELECT ssl FROM pg_stat_ssl WHERE pid = pg_backend_pid()), false)",
    )
    .fetch_one(pool)
    .await
    .unwrap_or((false,));

    if ssl_result.0 {
        info!("Database health check passed (SSL enabled)");
    } else {
        warn!("Database health check passed (SSL NOT enabled)");
    }

    Ok(())
}

/// Database-specific errors
#[derive(Debug)]
pub enum DatabaseError {
    /// Configuration error (invalid URL, etc.)
    Configuration(String),
    /// Connection error
    Connection(String),
    /// Health check failed
    HealthCheck(String),
    /// Migration error
    Migration(String),
}

impl std::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Database configuration error: {}", msg),
            Self::Connection(msg) => write!(f, "Database connection error: {}", msg),
            Self::HealthCheck(msg) => write!(f, "Database health check failed: {}", msg),
            Self::Migration(msg) => write!(f, "Database migration error: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {}

/// PostgreSQL-backed [`UserStore`].
///
/// `PgPool` is internally reference-counted, so this store is cheap to clone.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for migrations and ad hoc queries.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        sqlx::query_as::<_, UserAccount>(
            "SELECT id, username, email, password_hash, failed_login_attempts, \
             locked_until, is_active, roles \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn save(&self, account: &UserAccount) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users \
             (id, username, email, password_hash, failed_login_attempts, \
              locked_until, is_active, roles) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
             username = EXCLUDED.username, \
             email = EXCLUDED.email, \
             password_hash = EXCLUDED.password_hash, \
             failed_login_attempts = EXCLUDED.failed_login_attempts, \
             locked_until = EXCLUDED.locked_until, \
             is_active = EXCLUDED.is_active, \
             roles = EXCLUDED.roles",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.failed_login_attempts)
        .bind(account.locked_until)
        .bind(account.is_active)
        .bind(&account.roles)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.ssl_mode, SslMode::Require);
        assert!(config.requires_ssl());
    }

    #[test]
    fn test_ssl_mode_parsing() {
        assert_eq!(SslMode::parse("disable"), SslMode::Disable);
        assert_eq!(SslMode::parse("PREFER"), SslMode::Prefer);
        assert_eq!(SslMode::parse("verify-full"), SslMode::VerifyFull);
        assert_eq!(SslMode::parse("bogus"), SslMode::Require);
    }

    #[test]
    fn test_builder() {
        let config = DatabaseConfig::builder("postgres://localhost/app")
            .max_connections(5)
            .ssl_mode(SslMode::Disable)
            .build();

        assert_eq!(config.database_url, "postgres://localhost/app");
        assert_eq!(config.max_connections, 5);
        assert!(!config.requires_ssl());
    }
}
