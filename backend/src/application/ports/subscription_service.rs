use async_trait::async_trait;
use crate::domain::value_objects::UserId;

/// Discussion subscription lookup (comments service)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    async fn is_subscribed_to_thread(
        &self,
        user: &UserId,
        course_id: &str,
        thread_id: &str,
    ) -> anyhow::Result<bool>;
}
