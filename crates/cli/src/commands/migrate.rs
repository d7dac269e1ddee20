//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! ubj-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string, or
//! - `DATABASE_USER` / `DATABASE_PASS` / `DATABASE_HOST` / `DATABASE_NAME`
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded at
//! compile time.

use thiserror::Error;
use tracing::info;

use ub_jewellers_server::config::{ConfigError, ServerConfig};
use ub_jewellers_server::db;

/// Errors from running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    info!("Connecting to catalog database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running catalog migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    pool.close().await;
    info!("Catalog migrations complete!");
    Ok(())
}
