use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use payload_tracker_core::AppError;

const REQUESTS_TOTAL: &str = "payload_tracker_requests_total";
const DB_SECONDS: &str = "payload_tracker_db_seconds";

/// Installs the global Prometheus recorder and returns its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, AppError> {
    PrometheusBuilder::new().install_recorder().map_err(|error| {
        AppError::Internal(format!("failed to install metrics recorder: {error}"))
    })
}

/// Counts one request to a listing endpoint.
pub fn record_request(endpoint: &'static str) {
    counter!(REQUESTS_TOTAL, "endpoint" => endpoint).increment(1);
}

/// Observes the time spent waiting on storage for one request.
pub fn record_db_time(endpoint: &'static str, elapsed: Duration) {
    histogram!(DB_SECONDS, "endpoint" => endpoint).record(elapsed.as_secs_f64());
}
