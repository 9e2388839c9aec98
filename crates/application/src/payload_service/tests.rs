use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use payload_tracker_core::{AppError, AppResult};
use payload_tracker_domain::{
    EventTiming, Payload, SortDirection, SortOrder, StatusEventView, StatusSortColumn,
    TimedStatusEvent, Verbosity,
};

use crate::payload_ports::{Page, Pagination, PayloadFilter, PayloadRepository, StatusFilter};

use super::PayloadService;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 10, 14, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("valid test timestamp"))
}

#[derive(Default)]
struct FakePayloadRepository {
    events: Mutex<Vec<(String, TimedStatusEvent)>>,
    // Committed by a concurrent writer right after the next read.
    committed_after_read: Mutex<Vec<(String, TimedStatusEvent)>>,
    detail_calls: Mutex<Vec<(String, SortOrder<StatusSortColumn>, Verbosity)>>,
    fail_storage: bool,
}

fn timed_event(
    request_id: &str,
    service: &str,
    source: &str,
    offset_secs: i64,
) -> (String, TimedStatusEvent) {
    let date = origin() + Duration::seconds(offset_secs);
    (
        request_id.to_owned(),
        TimedStatusEvent {
            view: StatusEventView {
                service: Some(service.to_owned()),
                status: Some("processing".to_owned()),
                date: Some(date),
                ..StatusEventView::default()
            },
            timing: EventTiming::new(service, source, date),
        },
    )
}

impl FakePayloadRepository {
    fn with_event(
        mut self,
        request_id: &str,
        service: &str,
        source: &str,
        offset_secs: i64,
    ) -> Self {
        self.events
            .get_mut()
            .push(timed_event(request_id, service, source, offset_secs));
        self
    }

    fn with_event_committed_after_read(
        mut self,
        request_id: &str,
        service: &str,
        source: &str,
        offset_secs: i64,
    ) -> Self {
        self.committed_after_read
            .get_mut()
            .push(timed_event(request_id, service, source, offset_secs));
        self
    }
}

#[async_trait]
impl PayloadRepository for FakePayloadRepository {
    async fn list_payloads(&self, filter: &PayloadFilter) -> AppResult<Page<Payload>> {
        if self.fail_storage {
            return Err(AppError::Internal("connection refused".to_owned()));
        }

        let payloads: Vec<Payload> = (0..25)
            .map(|id| Payload {
                id,
                request_id: format!("request-{id}"),
                account: Some("540155".to_owned()),
                inventory_id: None,
                system_id: None,
                created_at: origin(),
            })
            .collect();

        let offset = usize::try_from(filter.pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.pagination.limit()).unwrap_or(usize::MAX);
        Ok(Page {
            count: payloads.len() as i64,
            items: payloads.into_iter().skip(offset).take(limit).collect(),
        })
    }

    async fn list_status_events(
        &self,
        request_id: &str,
        sort: SortOrder<StatusSortColumn>,
        verbosity: Verbosity,
    ) -> AppResult<Vec<TimedStatusEvent>> {
        if self.fail_storage {
            return Err(AppError::Internal("connection refused".to_owned()));
        }

        self.detail_calls
            .lock()
            .await
            .push((request_id.to_owned(), sort, verbosity));

        let mut events = self.events.lock().await;
        let matching = events
            .iter()
            .filter(|(id, _)| id == request_id)
            .map(|(_, event)| event.clone())
            .collect();
        events.append(&mut *self.committed_after_read.lock().await);

        Ok(matching)
    }

    async fn list_statuses(&self, _filter: &StatusFilter) -> AppResult<Page<StatusEventView>> {
        Ok(Page {
            count: 0,
            items: Vec::new(),
        })
    }
}

#[tokio::test]
async fn detail_combines_events_and_durations() {
    let repository = Arc::new(
        FakePayloadRepository::default()
            .with_event("abc", "ingress", "", 0)
            .with_event("abc", "ingress", "", 5)
            .with_event("abc", "puptoo", "satellite", 7)
            .with_event("abc", "puptoo", "satellite", 3_607)
            .with_event("other", "ingress", "", 90_000),
    );
    let service = PayloadService::new(repository.clone());

    let detail = service
        .payload_detail("abc", SortOrder::default(), Verbosity::Standard)
        .await;

    let Ok(Some(detail)) = detail else {
        panic!("detail must be found");
    };
    assert_eq!(detail.events.len(), 4);
    assert_eq!(
        detail.durations.get("ingress:undefined").map(String::as_str),
        Some("00:00:05.000000")
    );
    assert_eq!(
        detail.durations.get("puptoo:satellite").map(String::as_str),
        Some("01:00:00.000000")
    );
}

#[tokio::test]
async fn durations_cover_exactly_the_returned_events() {
    let repository = Arc::new(
        FakePayloadRepository::default()
            .with_event("abc", "ingress", "", 0)
            .with_event("abc", "ingress", "", 5)
            .with_event_committed_after_read("abc", "ingress", "", 60),
    );
    let service = PayloadService::new(repository.clone());

    let detail = service
        .payload_detail("abc", SortOrder::default(), Verbosity::Minimal)
        .await;

    let Ok(Some(detail)) = detail else {
        panic!("detail must be found");
    };
    assert_eq!(detail.events.len(), 2);
    assert_eq!(
        detail.durations.get("ingress:undefined").map(String::as_str),
        Some("00:00:05.000000")
    );
    assert_eq!(repository.detail_calls.lock().await.len(), 1);

    let refreshed = service
        .payload_detail("abc", SortOrder::default(), Verbosity::Minimal)
        .await;
    let Ok(Some(refreshed)) = refreshed else {
        panic!("detail must be found");
    };
    assert_eq!(refreshed.events.len(), 3);
    assert_eq!(
        refreshed.durations.get("ingress:undefined").map(String::as_str),
        Some("00:01:00.000000")
    );
}

#[tokio::test]
async fn unknown_request_id_is_not_found_rather_than_error() {
    let service = PayloadService::new(Arc::new(FakePayloadRepository::default()));

    let detail = service
        .payload_detail("missing", SortOrder::default(), Verbosity::Minimal)
        .await;

    assert!(matches!(detail, Ok(None)));
}

#[tokio::test]
async fn sort_and_verbosity_are_passed_per_call() {
    let repository = Arc::new(FakePayloadRepository::default().with_event("abc", "ingress", "", 0));
    let service = PayloadService::new(repository.clone());
    let sort = SortOrder::new(StatusSortColumn::Service, SortDirection::Asc);

    let first = service
        .list_status_events("abc", sort, Verbosity::Full)
        .await;
    let second = service
        .list_status_events(" abc ", SortOrder::default(), Verbosity::Minimal)
        .await;
    assert!(first.is_ok());
    assert!(second.is_ok());

    let calls = repository.detail_calls.lock().await;
    assert_eq!(
        *calls,
        vec![
            ("abc".to_owned(), sort, Verbosity::Full),
            ("abc".to_owned(), SortOrder::default(), Verbosity::Minimal),
        ]
    );
}

#[tokio::test]
async fn blank_request_id_is_rejected() {
    let service = PayloadService::new(Arc::new(FakePayloadRepository::default()));

    let result = service
        .payload_detail("   ", SortOrder::default(), Verbosity::Minimal)
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn count_is_independent_of_pagination() {
    let service = PayloadService::new(Arc::new(FakePayloadRepository::default()));
    let filter = PayloadFilter {
        pagination: Pagination {
            page: 2,
            page_size: 10,
        },
        ..PayloadFilter::default()
    };

    let page = service.list_payloads(&filter).await;

    let Ok(page) = page else {
        panic!("listing must succeed");
    };
    assert_eq!(page.count, 25);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items.first().map(|payload| payload.id), Some(20));
}

#[tokio::test]
async fn storage_failures_propagate() {
    let service = PayloadService::new(Arc::new(FakePayloadRepository {
        fail_storage: true,
        ..FakePayloadRepository::default()
    }));

    let listing = service.list_payloads(&PayloadFilter::default()).await;
    let detail = service
        .payload_detail("abc", SortOrder::default(), Verbosity::Minimal)
        .await;

    assert!(matches!(listing, Err(AppError::Internal(_))));
    assert!(matches!(detail, Err(AppError::Internal(_))));
}
