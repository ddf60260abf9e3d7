use std::fmt;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "This field is required.")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("validation failed: {}", describe_fields(.fields))]
    Validation { fields: Vec<FieldError> },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("collaborator call failed: {0}")]
    Collaborator(String),

    #[error("storage error: {0}")]
    Storage(String),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            fields: vec![FieldError::new(field, message)],
        }
    }

    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn storage(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }

    pub fn collaborator(err: impl fmt::Display) -> Self {
        Self::Collaborator(err.to_string())
    }

    /// Field names carried by a validation error, empty for other kinds
    #[cfg(test)]
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            Self::Validation { fields } => fields.iter().map(|f| f.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = DomainError::Validation {
            fields: vec![FieldError::required("mode"), FieldError::required("course_uuid")],
        };
        let msg = err.to_string();
        assert!(msg.contains("mode: This field is required."));
        assert!(msg.contains("course_uuid"));
        assert_eq!(err.invalid_fields(), vec!["mode", "course_uuid"]);
    }

    #[test]
    fn test_storage_keeps_error_chain() {
        let err = DomainError::storage(anyhow::anyhow!("disk full").context("saving entitlement"));
        assert_eq!(err.to_string(), "storage error: saving entitlement: disk full");
    }
}
