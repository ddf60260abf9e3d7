pub mod persistence;
pub mod enrollment_client;
pub mod comments_client;
pub mod mail;
pub mod event_bus;

pub use persistence::*;
pub use enrollment_client::HttpEnrollmentService;
pub use comments_client::HttpSubscriptionService;
pub use mail::{LogMessageSender, SmtpMessageSender};
pub use event_bus::{spawn_notification_worker, EventPublisher};
