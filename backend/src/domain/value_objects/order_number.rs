use serde::{Deserialize, Serialize};
use std::fmt;

/// Order reference supplied by the ecommerce system that sold the entitlement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn new(order_number: impl Into<String>) -> Result<Self, String> {
        let order_number = order_number.into().trim().to_string();
        if order_number.is_empty() {
            return Err("Order number cannot be empty".to_string());
        }
        if order_number.len() > 128 {
            return Err("Order number too long".to_string());
        }
        Ok(Self(order_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
