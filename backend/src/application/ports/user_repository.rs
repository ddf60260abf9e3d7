// Driven port - user directory (read only, accounts are owned elsewhere)

use async_trait::async_trait;
use crate::domain::entities::User;
use crate::domain::value_objects::UserId;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> anyhow::Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
}
