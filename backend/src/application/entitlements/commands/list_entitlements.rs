use crate::application::ports::{EntitlementFilter, EntitlementRepository};
use crate::domain::entities::Entitlement;
use crate::domain::error::DomainError;

pub async fn execute<R: EntitlementRepository + ?Sized>(
    repo: &R,
    filter: &EntitlementFilter,
) -> Result<Vec<Entitlement>, DomainError> {
    repo.list(filter).await.map_err(DomainError::storage)
}
