use std::time::Instant;

use axum::Json;
use axum::extract::{Query, State};
use tracing::info;

use crate::dto::StatusesResponse;
use crate::error::ApiResult;
use crate::handlers::params::ListingQuery;
use crate::state::AppState;
use crate::telemetry;

pub async fn list_statuses_handler(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<StatusesResponse>> {
    let started = Instant::now();
    telemetry::record_request("statuses");
    let filter = query.status_filter()?;

    let page = state.payload_service.list_statuses(&filter).await?;
    telemetry::record_db_time("statuses", started.elapsed());
    let elapsed = started.elapsed().as_secs_f64();

    info!(count = page.count, elapsed, "status listing served");

    Ok(Json(StatusesResponse {
        count: page.count,
        elapsed,
        data: page.items,
    }))
}
