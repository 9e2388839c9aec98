use std::collections::BTreeMap;

use payload_tracker_domain::{Payload, StatusEventView};
use serde::Serialize;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}

/// One runtime dependency health status.
#[derive(Debug, Serialize)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Paginated payload listing.
#[derive(Debug, Serialize)]
pub struct PayloadsResponse {
    pub count: i64,
    /// Handler wall time in seconds.
    pub elapsed: f64,
    pub data: Vec<Payload>,
}

/// Paginated joined status event listing, projected by verbosity.
#[derive(Debug, Serialize)]
pub struct StatusesResponse {
    pub count: i64,
    /// Handler wall time in seconds.
    pub elapsed: f64,
    pub data: Vec<StatusEventView>,
}

/// Status events of one request id with per-hop durations.
#[derive(Debug, Serialize)]
pub struct PayloadDetailResponse {
    pub data: Vec<StatusEventView>,
    pub durations: BTreeMap<String, String>,
}
