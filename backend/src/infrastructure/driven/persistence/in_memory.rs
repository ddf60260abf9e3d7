use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::application::ports::{EntitlementFilter, EntitlementRepository, UserRepository};
use crate::domain::entities::{Entitlement, User};
use crate::domain::value_objects::UserId;

#[derive(Default)]
struct EntitlementTable {
    records: HashMap<Uuid, Entitlement>,
    insertion_order: Vec<Uuid>,
}

/// In-memory implementation of EntitlementRepository for use-case tests
#[derive(Clone, Default)]
pub struct InMemoryEntitlementRepository {
    table: Arc<RwLock<EntitlementTable>>,
}

impl InMemoryEntitlementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntitlementRepository for InMemoryEntitlementRepository {
    async fn save(&self, entitlement: &Entitlement) -> anyhow::Result<()> {
        let mut table = self.table.write().await;
        let id = *entitlement.uuid();
        if table.records.insert(id, entitlement.clone()).is_none() {
            table.insertion_order.push(id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<Entitlement>> {
        let table = self.table.read().await;
        Ok(table.records.get(id).cloned())
    }

    async fn list(&self, filter: &EntitlementFilter) -> anyhow::Result<Vec<Entitlement>> {
        let table = self.table.read().await;
        Ok(table
            .insertion_order
            .iter()
            .filter_map(|id| table.records.get(id))
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username() == username).cloned())
    }
}
