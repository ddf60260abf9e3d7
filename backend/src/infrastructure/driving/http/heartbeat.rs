use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use crate::infrastructure::AppState;

/// Liveness probe; reports each backing service it could reach
pub async fn heartbeat(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.entitlement_repo.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "sql": { "status": true } }))),
        Err(e) => {
            tracing::error!(error = %e, "Heartbeat failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "sql": { "status": false, "message": format!("{e:#}") } })),
            )
        }
    }
}
