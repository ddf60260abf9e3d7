use async_trait::async_trait;
use serde_json::{Map, Value};
use crate::domain::value_objects::Email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub username: String,
    pub email: Email,
}

/// A personalised message ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Message type, selects the template
    pub name: String,
    pub recipient: Recipient,
    pub language: String,
    pub context: Map<String, Value>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &Message) -> anyhow::Result<()>;
}
