use anyhow::{anyhow, Context};
use async_trait::async_trait;
use sqlx::SqlitePool;
use crate::application::ports::UserRepository;
use crate::domain::entities::User;
use crate::domain::value_objects::{Email, UserId};
use crate::infrastructure::driven::persistence::db_types::DbUser;

/// Read-only view over the `users` table synced from the accounts system
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_to_user(row: DbUser) -> anyhow::Result<User> {
    let id: UserId = row.id.parse().with_context(|| format!("Invalid user id: {}", row.id))?;
    let email = Email::new(row.email).map_err(|e| anyhow!(e))?;
    Ok(User::from_persistence(id, row.username, email, row.is_staff))
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: &UserId) -> anyhow::Result<Option<User>> {
        let row: Option<DbUser> =
            sqlx::query_as("SELECT id, username, email, is_staff FROM users WHERE id = ?1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .context("Database error")?;
        row.map(db_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row: Option<DbUser> =
            sqlx::query_as("SELECT id, username, email, is_staff FROM users WHERE username = ?1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .context("Database error")?;
        row.map(db_to_user).transpose()
    }
}
