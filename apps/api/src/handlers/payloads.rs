use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use payload_tracker_core::AppError;
use tracing::info;

use crate::dto::{PayloadDetailResponse, PayloadsResponse};
use crate::error::ApiResult;
use crate::handlers::params::ListingQuery;
use crate::state::AppState;
use crate::telemetry;

pub async fn list_payloads_handler(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<PayloadsResponse>> {
    let started = Instant::now();
    telemetry::record_request("payloads");
    let filter = query.payload_filter()?;

    let page = state.payload_service.list_payloads(&filter).await?;
    telemetry::record_db_time("payloads", started.elapsed());
    let elapsed = started.elapsed().as_secs_f64();

    info!(
        count = page.count,
        page = filter.pagination.page,
        page_size = filter.pagination.page_size,
        elapsed,
        "payload listing served"
    );

    Ok(Json(PayloadsResponse {
        count: page.count,
        elapsed,
        data: page.items,
    }))
}

pub async fn payload_detail_handler(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<PayloadDetailResponse>> {
    let started = Instant::now();
    telemetry::record_request("payload_detail");
    let (sort, verbosity) = query.detail_options()?;

    let detail = state
        .payload_service
        .payload_detail(request_id.as_str(), sort, verbosity)
        .await?;
    telemetry::record_db_time("payload_detail", started.elapsed());
    let detail = detail
        .ok_or_else(|| AppError::NotFound(format!("payload with id: {request_id} not found")))?;

    Ok(Json(PayloadDetailResponse {
        data: detail.events,
        durations: detail.durations,
    }))
}
