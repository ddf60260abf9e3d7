use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::entities::Entitlement;
use crate::domain::value_objects::UserId;

/// Criteria for listing entitlements. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitlementFilter {
    pub owner: Option<UserId>,
    pub course_uuid: Option<Uuid>,
}

impl EntitlementFilter {
    pub fn for_owner(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    pub fn matches(&self, entitlement: &Entitlement) -> bool {
        self.owner.as_ref().map_or(true, |o| o == entitlement.owner())
            && self.course_uuid.as_ref().map_or(true, |c| c == entitlement.course_uuid())
    }
}

/// Durable store of entitlements.
///
/// `save` is an upsert keyed on the entitlement UUID; `list` returns records
/// in the order they were first saved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    async fn save(&self, entitlement: &Entitlement) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<Entitlement>>;
    async fn list(&self, filter: &EntitlementFilter) -> anyhow::Result<Vec<Entitlement>>;
    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
