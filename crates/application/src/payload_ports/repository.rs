use async_trait::async_trait;
use payload_tracker_core::AppResult;
use payload_tracker_domain::{
    Payload, SortOrder, StatusEventView, StatusSortColumn, TimedStatusEvent, Verbosity,
};

use super::filter::{PayloadFilter, StatusFilter};

/// One page of a listing plus the number of rows matching the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Total matching rows, ignoring pagination.
    pub count: i64,
    /// Rows of the requested page.
    pub items: Vec<T>,
}

/// Read-only port over the payload and status event store.
#[async_trait]
pub trait PayloadRepository: Send + Sync {
    /// Lists payloads matching the filter.
    async fn list_payloads(&self, filter: &PayloadFilter) -> AppResult<Page<Payload>>;

    /// Lists the status events of one request id, each projected for
    /// `verbosity` and paired with its timing, in a single statement.
    async fn list_status_events(
        &self,
        request_id: &str,
        sort: SortOrder<StatusSortColumn>,
        verbosity: Verbosity,
    ) -> AppResult<Vec<TimedStatusEvent>>;

    /// Lists joined status events matching the filter, projected for the
    /// filter's verbosity.
    async fn list_statuses(&self, filter: &StatusFilter) -> AppResult<Page<StatusEventView>>;
}
