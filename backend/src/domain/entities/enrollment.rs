use crate::domain::value_objects::CourseRunId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an enrollment record owned by the enrollment system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEnrollment {
    pub id: Uuid,
    pub course_run_id: CourseRunId,
}

impl CourseEnrollment {
    pub fn new(id: Uuid, course_run_id: CourseRunId) -> Self {
        Self { id, course_run_id }
    }
}
