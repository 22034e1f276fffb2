//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Database URL from `SHOWCASE_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// # Errors
///
/// Returns an error naming the variable if neither is set.
pub fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("SHOWCASE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SHOWCASE_DATABASE_URL not set".into())
}
