pub mod user;
pub mod enrollment;
pub mod entitlement;

pub use user::User;
pub use enrollment::CourseEnrollment;
pub use entitlement::{Entitlement, EntitlementState};
