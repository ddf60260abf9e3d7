use serde::{Deserialize, Serialize};
use std::fmt;

/// Access mode an entitlement grants (`verified`, `professional`, ...).
///
/// Modes are configured by the catalog, so any non-blank slug is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseMode(String);

impl CourseMode {
    #[cfg(test)]
    pub const VERIFIED: &'static str = "verified";

    pub fn new(mode: impl Into<String>) -> Result<Self, String> {
        let mode = mode.into().trim().to_string();
        if mode.is_empty() {
            return Err("Mode cannot be empty".to_string());
        }
        if mode.len() > 100 {
            return Err("Mode too long".to_string());
        }
        Ok(Self(mode))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
