use crate::application::ports::{EnrollmentError, EnrollmentService, EntitlementRepository};
use crate::domain::error::DomainError;
use crate::domain::value_objects::CourseRunId;
use chrono::Utc;
use uuid::Uuid;

/// What a revoke call actually changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevokeOutcome {
    /// `expired_at` was stamped by this call
    pub expired: bool,
    /// Course run the owner was unenrolled from by this call
    pub unenrolled_from: Option<CourseRunId>,
    /// The record was written back to the store
    pub persisted: bool,
}

/// Expire an entitlement and unwind its enrollment, if any.
///
/// The enrollment system is called before the binding is cleared and the
/// record is written at most once, after both steps. A failed unenroll aborts
/// without persisting anything, so the whole call can be retried.
pub async fn execute<R, E>(repo: &R, enrollments: &E, id: &Uuid) -> Result<RevokeOutcome, DomainError>
where
    R: EntitlementRepository + ?Sized,
    E: EnrollmentService + ?Sized,
{
    let mut entitlement = repo
        .find_by_id(id)
        .await
        .map_err(DomainError::storage)?
        .ok_or_else(|| DomainError::not_found("Entitlement", id))?;

    tracing::info!(entitlement = %id, state = ?entitlement.state(), "Revoking course entitlement");
    let mut outcome = RevokeOutcome::default();

    let now = Utc::now();
    if entitlement.expire(now) {
        tracing::info!("Set expired_at to [{}] for course entitlement [{}]", now, id);
        outcome.expired = true;
    }

    if let Some(enrollment) = entitlement.enrollment().cloned() {
        match enrollments
            .unenroll(entitlement.owner(), &enrollment.course_run_id, true)
            .await
        {
            Ok(()) => {}
            Err(EnrollmentError::NotEnrolled { .. }) => {
                tracing::warn!(
                    entitlement = %id,
                    course_run = %enrollment.course_run_id,
                    "User was already unenrolled from course run"
                );
            }
            Err(e) => {
                tracing::error!(entitlement = %id, error = %e, "Unenroll failed, entitlement left unchanged");
                return Err(DomainError::collaborator(e));
            }
        }
        entitlement.detach_enrollment();
        tracing::info!("User unenrolled from Course run [{}]", enrollment.course_run_id);
        outcome.unenrolled_from = Some(enrollment.course_run_id);
    }

    if outcome.expired || outcome.unenrolled_from.is_some() {
        repo.save(&entitlement).await.map_err(DomainError::storage)?;
        outcome.persisted = true;
    }

    Ok(outcome)
}
