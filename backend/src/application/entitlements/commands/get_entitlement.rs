use crate::application::ports::EntitlementRepository;
use crate::domain::entities::Entitlement;
use crate::domain::error::DomainError;
use uuid::Uuid;

pub async fn execute<R: EntitlementRepository + ?Sized>(
    repo: &R,
    id: &Uuid,
) -> Result<Entitlement, DomainError> {
    repo.find_by_id(id)
        .await
        .map_err(DomainError::storage)?
        .ok_or_else(|| DomainError::not_found("Entitlement", id))
}
