use payload_tracker_application::{
    FilterColumn, Pagination, PayloadFilter, Predicate, PredicateValue, StatusFilter,
};
use payload_tracker_core::{AppError, AppResult};
use payload_tracker_domain::{
    PayloadSortColumn, ProjectedColumn, SortDirection, SortOrder, StatusSortColumn, Verbosity,
};
use sqlx::{Postgres, QueryBuilder};

const PAYLOAD_COLUMNS: &str = "payloads.id, payloads.request_id, payloads.account, \
payloads.inventory_id, payloads.system_id, payloads.created_at";

// Selected by every detail query whatever the verbosity, for duration aggregation.
const TIMING_COLUMNS: &str = "services.name AS event_service, sources.name AS event_source, \
payload_statuses.date AS event_date";

const STATUS_JOINS: &str = " FROM payload_statuses \
JOIN payloads ON payload_statuses.payload_id = payloads.id \
JOIN services ON payload_statuses.service_id = services.id \
JOIN sources ON payload_statuses.source_id = sources.id \
JOIN statuses ON payload_statuses.status_id = statuses.id";

fn filter_column_sql(column: FilterColumn) -> &'static str {
    match column {
        FilterColumn::Account => "payloads.account",
        FilterColumn::InventoryId => "payloads.inventory_id",
        FilterColumn::SystemId => "payloads.system_id",
        FilterColumn::Service => "services.name",
        FilterColumn::Source => "sources.name",
        FilterColumn::Status => "statuses.name",
        FilterColumn::StatusMessage => "payload_statuses.status_msg",
        FilterColumn::PayloadCreatedAt => "payloads.created_at",
        FilterColumn::EventDate => "payload_statuses.date",
        FilterColumn::EventCreatedAt => "payload_statuses.created_at",
    }
}

fn payload_sort_sql(column: PayloadSortColumn) -> &'static str {
    match column {
        PayloadSortColumn::Account => "payloads.account",
        PayloadSortColumn::InventoryId => "payloads.inventory_id",
        PayloadSortColumn::SystemId => "payloads.system_id",
        PayloadSortColumn::CreatedAt => "payloads.created_at",
    }
}

fn status_sort_sql(column: StatusSortColumn) -> &'static str {
    match column {
        StatusSortColumn::Service => "services.name",
        StatusSortColumn::Source => "sources.name",
        StatusSortColumn::Status => "statuses.name",
        StatusSortColumn::StatusMessage => "payload_statuses.status_msg",
        StatusSortColumn::Date => "payload_statuses.date",
        StatusSortColumn::CreatedAt => "payload_statuses.created_at",
    }
}

fn projected_column_sql(column: ProjectedColumn) -> &'static str {
    match column {
        ProjectedColumn::PayloadId => "payloads.id AS id",
        ProjectedColumn::RequestId => "payloads.request_id AS request_id",
        ProjectedColumn::Account => "payloads.account AS account",
        ProjectedColumn::SystemId => "payloads.system_id AS system_id",
        ProjectedColumn::InventoryId => "payloads.inventory_id AS inventory_id",
        ProjectedColumn::StatusMessage => "payload_statuses.status_msg AS status_msg",
        ProjectedColumn::Date => "payload_statuses.date AS date",
        ProjectedColumn::CreatedAt => "payload_statuses.created_at AS created_at",
        ProjectedColumn::Service => "services.name AS service",
        ProjectedColumn::Source => "sources.name AS source",
        ProjectedColumn::Status => "statuses.name AS status",
    }
}

/// Returns the select list for a verbosity level, in projection order.
pub(super) fn projection_sql(verbosity: Verbosity) -> String {
    verbosity
        .projected_columns()
        .iter()
        .map(|column| projected_column_sql(*column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_predicates(builder: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(filter_column_sql(predicate.column));
        builder.push(' ');
        builder.push(predicate.operator.as_sql());
        builder.push(' ');
        match &predicate.value {
            PredicateValue::Text(value) => builder.push_bind(value.clone()),
            PredicateValue::Timestamp(value) => builder.push_bind(*value),
        };
    }
}

fn push_order(
    builder: &mut QueryBuilder<'static, Postgres>,
    column_sql: &str,
    direction: SortDirection,
) {
    builder.push(" ORDER BY ");
    builder.push(column_sql);
    builder.push(' ');
    builder.push(direction.as_sql());
}

fn push_pagination(
    builder: &mut QueryBuilder<'static, Postgres>,
    pagination: Pagination,
) -> AppResult<()> {
    let limit = i64::try_from(pagination.limit())
        .map_err(|error| AppError::Validation(format!("invalid page_size: {error}")))?;
    let offset = i64::try_from(pagination.offset())
        .map_err(|error| AppError::Validation(format!("invalid page offset: {error}")))?;

    builder.push(" LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);
    Ok(())
}

pub(super) fn payload_count_query(filter: &PayloadFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM payloads");
    push_predicates(&mut builder, &filter.payload_predicates());
    builder
}

pub(super) fn payload_page_query(
    filter: &PayloadFilter,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(PAYLOAD_COLUMNS);
    builder.push(" FROM payloads");
    push_predicates(&mut builder, &filter.payload_predicates());
    push_order(
        &mut builder,
        payload_sort_sql(filter.sort.column),
        filter.sort.direction,
    );
    push_pagination(&mut builder, filter.pagination)?;
    Ok(builder)
}

pub(super) fn status_count_query(filter: &StatusFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*)");
    builder.push(STATUS_JOINS);
    push_predicates(&mut builder, &filter.status_predicates());
    builder
}

pub(super) fn status_page_query(
    filter: &StatusFilter,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(projection_sql(filter.verbosity));
    builder.push(STATUS_JOINS);
    push_predicates(&mut builder, &filter.status_predicates());
    push_order(
        &mut builder,
        status_sort_sql(filter.sort.column),
        filter.sort.direction,
    );
    push_pagination(&mut builder, filter.pagination)?;
    Ok(builder)
}

pub(super) fn status_event_query(
    request_id: &str,
    sort: SortOrder<StatusSortColumn>,
    verbosity: Verbosity,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(projection_sql(verbosity));
    builder.push(", ");
    builder.push(TIMING_COLUMNS);
    builder.push(STATUS_JOINS);
    builder.push(" WHERE payloads.request_id = ");
    builder.push_bind(request_id.to_owned());
    push_order(&mut builder, status_sort_sql(sort.column), sort.direction);
    builder
}
