use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::CommentCreatedRequest;
use crate::domain::events::{Comment, CommentCreated, DomainEvent, Thread};
use crate::domain::value_objects::UserId;
use crate::infrastructure::driving::http::error::ApiError;
use crate::infrastructure::driving::http::extract::ApiJson;
use crate::infrastructure::driving::http::middleware::StaffUser;
use crate::infrastructure::AppState;

pub fn discussion_routes() -> Router<AppState> {
    Router::new().route("/api/discussion/v1/events/comment-created", post(comment_created))
}

impl From<CommentCreatedRequest> for CommentCreated {
    fn from(req: CommentCreatedRequest) -> Self {
        Self {
            comment: Comment {
                id: req.comment.id,
                body: req.comment.body,
                created_at: req.comment.created_at,
                author_id: UserId::from_uuid(req.comment.user_id),
                author_username: req.comment.username,
            },
            thread: Thread {
                id: req.thread.id,
                course_id: req.thread.course_id,
                created_at: req.thread.created_at,
                title: req.thread.title,
                author_id: UserId::from_uuid(req.thread.user_id),
                author_username: req.thread.username,
            },
        }
    }
}

/// Queue a response notification; delivery happens on the worker
async fn comment_created(
    State(state): State<AppState>,
    StaffUser(_caller): StaffUser,
    ApiJson(payload): ApiJson<CommentCreatedRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let event = DomainEvent::new(CommentCreated::from(payload));
    let event_id = event.event_id;
    state
        .events
        .publish(event)
        .await
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;
    Ok((StatusCode::ACCEPTED, Json(json!({ "event_id": event_id }))))
}
