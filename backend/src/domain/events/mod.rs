pub mod domain_event;
pub mod comment_created;

pub use domain_event::DomainEvent;
pub use comment_created::{Comment, CommentCreated, Thread};
