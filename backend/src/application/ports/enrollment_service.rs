use async_trait::async_trait;
use crate::domain::value_objects::{CourseRunId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum EnrollmentError {
    /// The user holds no enrollment in the run. Unenrolling is idempotent,
    /// so callers may treat this as success.
    #[error("user {user} is not enrolled in {course_run}")]
    NotEnrolled { user: UserId, course_run: CourseRunId },

    #[error("enrollment service unavailable: {0}")]
    Unavailable(String),
}

/// Enrollment system collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    async fn unenroll(
        &self,
        user: &UserId,
        course_run: &CourseRunId,
        skip_refund: bool,
    ) -> Result<(), EnrollmentError>;
}
