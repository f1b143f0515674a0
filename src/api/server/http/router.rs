use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::storage::GraphDatabase;

use super::{
    handlers::{extension, health},
    middleware::{error, logging},
    state::AppState,
};

pub fn create_router<G: GraphDatabase + ?Sized + 'static>(state: AppState<G>) -> Router {
    let timeout_secs = state.server.config().request_timeout_secs;

    let router = Router::new()
        .route("/health", get(health::check))
        .route(
            "/db/data/ext/{plugin}/{target}/{method}",
            get(extension::describe)
                .post(extension::execute::<G>)
                .fallback(extension::method_not_allowed),
        )
        .fallback(extension::not_found)
        .layer(middleware::from_fn(logging::logging_middleware))
        .layer(middleware::from_fn(error::error_handling_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // 0 表示不限制请求时长
    let router = if timeout_secs > 0 {
        router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_secs),
        ))
    } else {
        router
    };

    router.with_state(state)
}
