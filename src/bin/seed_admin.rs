//! Provision the initial admin account.
//!
//! Connects to the database named by `DATABASE_URL`, runs pending migrations,
//! and creates the `admin` user unless one already exists. The password must
//! be supplied through `SEED_ADMIN_PASSWORD`; it is hashed at the configured
//! bcrypt cost and never stored in plaintext.
//!
//! ```text
//! DATABASE_URL=postgres://... SEED_ADMIN_PASSWORD=... cargo run --features postgres --bin seed_admin
//! ```

use anyhow::Context;
use tracing::{info, warn};

use wicket::database::{create_pool, DatabaseConfig, PgUserStore};
use wicket::events::SecurityEvent;
use wicket::{hash_password, security_event, AuthConfig, UserAccount, UserStore};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@formsservice.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .json()
        .init();

    let db_config = DatabaseConfig::from_env().context("database configuration")?;
    let pool = create_pool(&db_config).await.context("connecting to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("running migrations")?;

    let store = PgUserStore::new(pool);

    if store
        .find_by_username(ADMIN_USERNAME)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .is_some()
    {
        info!(username = ADMIN_USERNAME, "Admin account already exists, nothing to do");
        return Ok(());
    }

    let password = std::env::var("SEED_ADMIN_PASSWORD")
        .context("SEED_ADMIN_PASSWORD environment variable must be set")?;

    let auth_config = AuthConfig::from_env();
    let password_hash = hash_password(&password, auth_config.bcrypt_cost)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let account = UserAccount::new(ADMIN_USERNAME, ADMIN_EMAIL, password_hash).with_role("admin");
    store
        .save(&account)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    security_event!(
        SecurityEvent::UserProvisioned,
        user_id = %account.id,
        username = ADMIN_USERNAME,
        "Admin account created"
    );
    warn!("Change the admin password after the first login");

    Ok(())
}
