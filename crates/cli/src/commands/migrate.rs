//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! showcase-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `SHOWCASE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded into this
//! binary at compile time.

use tracing::info;

use showcase_api::db;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
