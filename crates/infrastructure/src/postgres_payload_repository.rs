use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use payload_tracker_application::{Page, PayloadFilter, PayloadRepository, StatusFilter};
use payload_tracker_core::{AppError, AppResult};
use payload_tracker_domain::{
    EventTiming, Payload, SortOrder, StatusEventView, StatusSortColumn, TimedStatusEvent,
    Verbosity,
};

mod sql;


/// PostgreSQL-backed read repository for payloads and their status events.
#[derive(Clone)]
pub struct PostgresPayloadRepository {
    pool: PgPool,
}

impl PostgresPayloadRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_count(
        &self,
        mut builder: QueryBuilder<'static, Postgres>,
        listing: &str,
    ) -> AppResult<i64> {
        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count {listing}: {error}")))
    }
}

#[derive(Debug, FromRow)]
struct PayloadRow {
    id: i64,
    request_id: String,
    account: Option<String>,
    inventory_id: Option<String>,
    system_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<PayloadRow> for Payload {
    fn from(row: PayloadRow) -> Self {
        Self {
            id: row.id,
            request_id: row.request_id,
            account: row.account,
            inventory_id: row.inventory_id,
            system_id: row.system_id,
            created_at: row.created_at,
        }
    }
}

// Columns outside the verbosity projection are absent from the result set.
#[derive(Debug, FromRow)]
struct StatusEventViewRow {
    #[sqlx(default)]
    id: Option<i64>,
    #[sqlx(default)]
    request_id: Option<String>,
    #[sqlx(default)]
    account: Option<String>,
    #[sqlx(default)]
    system_id: Option<String>,
    #[sqlx(default)]
    inventory_id: Option<String>,
    #[sqlx(default)]
    status_msg: Option<String>,
    #[sqlx(default)]
    date: Option<DateTime<Utc>>,
    #[sqlx(default)]
    created_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    service: Option<String>,
    #[sqlx(default)]
    source: Option<String>,
    #[sqlx(default)]
    status: Option<String>,
}

impl From<StatusEventViewRow> for StatusEventView {
    fn from(row: StatusEventViewRow) -> Self {
        Self {
            id: row.id,
            request_id: row.request_id,
            account: row.account,
            system_id: row.system_id,
            inventory_id: row.inventory_id,
            status_msg: row.status_msg,
            date: row.date,
            created_at: row.created_at,
            service: row.service,
            source: row.source,
            status: row.status,
        }
    }
}

#[derive(Debug, FromRow)]
struct TimedStatusEventRow {
    #[sqlx(flatten)]
    view: StatusEventViewRow,
    event_service: String,
    event_source: String,
    event_date: DateTime<Utc>,
}

impl From<TimedStatusEventRow> for TimedStatusEvent {
    fn from(row: TimedStatusEventRow) -> Self {
        Self {
            view: row.view.into(),
            timing: EventTiming::new(row.event_service, row.event_source, row.event_date),
        }
    }
}

#[async_trait]
impl PayloadRepository for PostgresPayloadRepository {
    async fn list_payloads(&self, filter: &PayloadFilter) -> AppResult<Page<Payload>> {
        let started = Instant::now();
        let mut page_query = sql::payload_page_query(filter)?;

        let count = self
            .fetch_count(sql::payload_count_query(filter), "payloads")
            .await?;
        let rows = page_query
            .build_query_as::<PayloadRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list payloads: {error}")))?;

        debug!(
            count,
            returned = rows.len(),
            elapsed = ?started.elapsed(),
            "listed payloads"
        );

        Ok(Page {
            count,
            items: rows.into_iter().map(Payload::from).collect(),
        })
    }

    async fn list_status_events(
        &self,
        request_id: &str,
        sort: SortOrder<StatusSortColumn>,
        verbosity: Verbosity,
    ) -> AppResult<Vec<TimedStatusEvent>> {
        let started = Instant::now();
        let rows = sql::status_event_query(request_id, sort, verbosity)
            .build_query_as::<TimedStatusEventRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list status events for request '{request_id}': {error}"
                ))
            })?;

        debug!(
            request_id,
            verbosity = verbosity.level(),
            returned = rows.len(),
            elapsed = ?started.elapsed(),
            "listed status events"
        );

        Ok(rows.into_iter().map(TimedStatusEvent::from).collect())
    }

    async fn list_statuses(&self, filter: &StatusFilter) -> AppResult<Page<StatusEventView>> {
        let started = Instant::now();
        let mut page_query = sql::status_page_query(filter)?;

        let count = self
            .fetch_count(sql::status_count_query(filter), "status events")
            .await?;
        let rows = page_query
            .build_query_as::<StatusEventViewRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to list status events: {error}"))
            })?;

        debug!(
            count,
            verbosity = filter.verbosity.level(),
            returned = rows.len(),
            elapsed = ?started.elapsed(),
            "listed joined status events"
        );

        Ok(Page {
            count,
            items: rows.into_iter().map(StatusEventView::from).collect(),
        })
    }
}
