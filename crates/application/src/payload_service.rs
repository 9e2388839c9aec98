use std::collections::BTreeMap;
use std::sync::Arc;

use payload_tracker_core::{AppError, AppResult};
use payload_tracker_domain::{
    Payload, SortOrder, StatusEventView, StatusSortColumn, Verbosity, compute_durations,
};

use crate::payload_ports::{Page, PayloadFilter, PayloadRepository, StatusFilter};

#[cfg(test)]
mod tests;

/// Events of one request id together with per-hop durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDetail {
    /// Projected status events, in the requested order.
    pub events: Vec<StatusEventView>,
    /// Formatted elapsed time keyed by `"{service}:{source}"`.
    pub durations: BTreeMap<String, String>,
}

/// Application service for payload and status event queries.
#[derive(Clone)]
pub struct PayloadService {
    repository: Arc<dyn PayloadRepository>,
}

impl PayloadService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn PayloadRepository>) -> Self {
        Self { repository }
    }

    /// Lists payloads matching the filter.
    pub async fn list_payloads(&self, filter: &PayloadFilter) -> AppResult<Page<Payload>> {
        self.repository.list_payloads(filter).await
    }

    /// Lists joined status events matching the filter.
    pub async fn list_statuses(&self, filter: &StatusFilter) -> AppResult<Page<StatusEventView>> {
        self.repository.list_statuses(filter).await
    }

    /// Lists the projected status events of one request id.
    pub async fn list_status_events(
        &self,
        request_id: &str,
        sort: SortOrder<StatusSortColumn>,
        verbosity: Verbosity,
    ) -> AppResult<Vec<StatusEventView>> {
        let request_id = validated_request_id(request_id)?;
        let events = self
            .repository
            .list_status_events(request_id, sort, verbosity)
            .await?;

        Ok(events.into_iter().map(|event| event.view).collect())
    }

    /// Returns the detail view of one request id, or `None` when it has no events.
    pub async fn payload_detail(
        &self,
        request_id: &str,
        sort: SortOrder<StatusSortColumn>,
        verbosity: Verbosity,
    ) -> AppResult<Option<PayloadDetail>> {
        let request_id = validated_request_id(request_id)?;

        let events = self
            .repository
            .list_status_events(request_id, sort, verbosity)
            .await?;
        if events.is_empty() {
            return Ok(None);
        }

        let durations = compute_durations(events.iter().map(|event| &event.timing))?;

        Ok(Some(PayloadDetail {
            events: events.into_iter().map(|event| event.view).collect(),
            durations,
        }))
    }
}

fn validated_request_id(request_id: &str) -> AppResult<&str> {
    let request_id = request_id.trim();
    if request_id.is_empty() {
        return Err(AppError::Validation(
            "request_id must not be empty".to_owned(),
        ));
    }

    Ok(request_id)
}
