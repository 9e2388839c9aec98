use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        .route(
            "/api/v1/payloads",
            get(handlers::payloads::list_payloads_handler),
        )
        .route(
            "/api/v1/payloads/{request_id}",
            get(handlers::payloads::payload_detail_handler),
        )
        .route(
            "/api/v1/statuses",
            get(handlers::statuses::list_statuses_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
