use crate::domain::value_objects::UserId;
use chrono::{DateTime, Utc};

/// A response was posted on a discussion thread
#[derive(Debug, Clone, PartialEq)]
pub struct CommentCreated {
    pub comment: Comment,
    pub thread: Thread,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
    pub author_username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: String,
    pub course_id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub author_id: UserId,
    pub author_username: String,
}
