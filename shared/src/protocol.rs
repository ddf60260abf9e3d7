use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/entitlements/v1/entitlements/`.
///
/// Every field is optional on the wire so the server can report all missing
/// fields at once instead of failing on the first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEntitlementRequest {
    /// Username of the entitlement owner
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub course_uuid: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
}

/// Entitlement record as exposed by the REST resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitlementResponse {
    pub uuid: Uuid,
    /// Username of the owner
    pub user: String,
    pub course_uuid: Uuid,
    pub mode: String,
    pub order_number: String,
    pub created: DateTime<Utc>,
    pub expired_at: Option<DateTime<Utc>>,
    /// Course run the entitlement was redeemed into, if any
    pub enrollment_course_run: Option<String>,
}

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Forum comment notification event, as posted by the discussion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreatedRequest {
    pub comment: CommentPayload,
    pub thread: ThreadPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadPayload {
    pub id: String,
    pub course_id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub user_id: Uuid,
    pub username: String,
}

/// Error returned by every endpoint on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Per-field messages for validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}
