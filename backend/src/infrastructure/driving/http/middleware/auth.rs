use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, DecodingKey, Validation};
use crate::domain::error::DomainError;
use crate::domain::value_objects::UserId;
use crate::infrastructure::driving::http::error::ApiError;
use crate::infrastructure::AppState;

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}

/// An authenticated user with staff rights; every entitlement endpoint
/// requires one.
///
/// Staff status is read from the user directory on each request, so a
/// demotion takes effect before the token expires.
#[derive(Debug, Clone)]
pub struct StaffUser(pub AuthenticatedUser);

#[derive(Debug, serde::Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

#[async_trait]
impl FromRequestParts<AppState> for StaffUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = token_subject(parts, state)?;
        let user = state
            .user_repo
            .find_by_id(&id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

        if !user.is_staff() {
            return Err(ApiError::Forbidden(
                "You do not have permission to perform this action.".to_string(),
            ));
        }
        Ok(StaffUser(AuthenticatedUser {
            id,
            username: user.username().to_string(),
        }))
    }
}

fn token_subject(parts: &Parts, state: &AppState) -> Result<UserId, ApiError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Missing or invalid Authorization header".to_string()))?;

    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

    token_data
        .claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid user id in token".to_string()))
}
