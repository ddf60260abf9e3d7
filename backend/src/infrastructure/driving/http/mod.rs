pub mod middleware;
pub mod error;
pub mod extract;
pub mod entitlements;
pub mod discussion;
pub mod heartbeat;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use crate::infrastructure::AppState;

pub use discussion::discussion_routes;
pub use entitlements::entitlement_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat::heartbeat))
        .merge(entitlement_routes())
        .merge(discussion_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
