// Discussion forum use cases

pub mod response_notification;

pub use response_notification::{NotificationOutcome, NotificationSettings, ResponseNotificationHandler};
