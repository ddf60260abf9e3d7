use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;
use crate::application::ports::CourseCatalog;

pub struct SqliteCourseCatalog {
    pool: SqlitePool,
}

impl SqliteCourseCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseCatalog for SqliteCourseCatalog {
    async fn language_for(&self, course_id: &str) -> anyhow::Result<Option<String>> {
        let language: Option<Option<String>> =
            sqlx::query_scalar("SELECT language FROM course_overviews WHERE id = ?1")
                .bind(course_id)
                .fetch_optional(&self.pool)
                .await
                .context("Database error")?;
        Ok(language.flatten())
    }
}
