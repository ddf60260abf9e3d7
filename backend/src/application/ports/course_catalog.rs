use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Content language of a course run, `None` if unknown or unset
    async fn language_for(&self, course_id: &str) -> anyhow::Result<Option<String>>;
}
