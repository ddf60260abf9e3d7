mod db_types;
pub mod entitlement_repository;
pub mod user_repository;
pub mod course_catalog;
#[cfg(test)]
pub mod in_memory;

pub use entitlement_repository::SqliteEntitlementRepository;
pub use user_repository::SqliteUserRepository;
pub use course_catalog::SqliteCourseCatalog;
#[cfg(test)]
pub use in_memory::{InMemoryEntitlementRepository, InMemoryUserRepository};

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open the SQLite pool and bring the schema up to date.
///
/// In-memory databases live per connection, so callers pass
/// `max_connections = 1` for `sqlite::memory:`.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database url: {database_url}"))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("Failed to open database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database ready at {}", database_url);
    Ok(pool)
}
