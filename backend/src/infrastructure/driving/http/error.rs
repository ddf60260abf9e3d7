use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::{ErrorBody, FieldMessage};
use crate::domain::error::DomainError;

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Unauthorized(String),
    Forbidden(String),
    Unavailable(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

fn body(error: impl Into<String>) -> ErrorBody {
    ErrorBody {
        error: error.into(),
        fields: vec![],
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Domain(DomainError::Validation { fields }) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid request".to_string(),
                    fields: fields
                        .into_iter()
                        .map(|f| FieldMessage {
                            field: f.field,
                            message: f.message,
                        })
                        .collect(),
                },
            ),
            ApiError::Domain(e @ DomainError::NotFound { .. }) => (StatusCode::NOT_FOUND, body(e.to_string())),
            ApiError::Domain(e @ DomainError::Collaborator(_)) => {
                tracing::warn!(error = %e, "Upstream collaborator failed");
                (StatusCode::BAD_GATEWAY, body(e.to_string()))
            }
            ApiError::Domain(e @ DomainError::Storage(_)) => {
                tracing::error!(error = %e, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, body("An internal error occurred"))
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, body(msg)),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, body(msg)),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, body(msg)),
        };
        (status, Json(body)).into_response()
    }
}
