// Infrastructure layer - external concerns (database, collaborators, HTTP)
// Implements interfaces defined in application layer

use std::sync::Arc;
use crate::application::ports::{EnrollmentService, EntitlementRepository, UserRepository};

pub mod driven;    // Output adapters (repositories, external services)
pub mod driving;   // Input adapters (HTTP)

#[derive(Clone)]
pub struct AppState {
    pub entitlement_repo: Arc<dyn EntitlementRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub enrollment_service: Arc<dyn EnrollmentService>,
    pub events: driven::EventPublisher,
    pub jwt_secret: String,
}
