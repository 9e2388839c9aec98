use metrics_exporter_prometheus::PrometheusHandle;
use payload_tracker_application::PayloadService;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub payload_service: PayloadService,
    pub postgres_pool: PgPool,
    pub metrics: PrometheusHandle,
}
