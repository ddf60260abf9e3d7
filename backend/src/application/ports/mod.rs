// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod entitlement_repository;
pub mod user_repository;
pub mod enrollment_service;
pub mod subscription_service;
pub mod course_catalog;
pub mod message_sender;

pub use entitlement_repository::{EntitlementFilter, EntitlementRepository};
pub use user_repository::UserRepository;
pub use enrollment_service::{EnrollmentError, EnrollmentService};
pub use subscription_service::SubscriptionService;
pub use course_catalog::CourseCatalog;
pub use message_sender::{Message, MessageSender, Recipient};
