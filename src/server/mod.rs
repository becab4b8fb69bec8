pub mod handlers;
pub mod logging;
pub mod page;

use std::sync::Arc;

use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::relay::Relay;

use self::handlers::AppState;

/// Build the axum router: the web form, the JSON endpoint, and health.
pub fn build_router(relay: Relay) -> Router {
    let state = Arc::new(AppState { relay });

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .with_state(state)
}
