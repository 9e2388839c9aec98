use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use payload_tracker_application::{
    DEFAULT_PAGE_SIZE, FilterSpec, Pagination, PayloadFilter, StatusFilter, TimeRange,
};
use payload_tracker_core::AppError;
use payload_tracker_domain::{
    PayloadSortColumn, SortDirection, SortOrder, StatusSortColumn, Verbosity,
};
use serde::Deserialize;

/// Raw query string parameters shared by every listing endpoint.
///
/// Values stay strings until validated so that malformed input surfaces as a
/// client error with a readable message instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub account: Option<String>,
    pub inventory_id: Option<String>,
    pub system_id: Option<String>,
    pub service: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub status_msg: Option<String>,
    pub created_at_lt: Option<String>,
    pub created_at_lte: Option<String>,
    pub created_at_gt: Option<String>,
    pub created_at_gte: Option<String>,
    pub date_lt: Option<String>,
    pub date_lte: Option<String>,
    pub date_gt: Option<String>,
    pub date_gte: Option<String>,
    pub verbosity: Option<String>,
}

impl ListingQuery {
    pub fn payload_filter(self) -> Result<PayloadFilter, AppError> {
        let column = match non_empty(self.sort_by.as_deref()) {
            Some(value) => PayloadSortColumn::parse_transport(value)?,
            None => PayloadSortColumn::default(),
        };
        self.into_filter(column)
    }

    pub fn status_filter(self) -> Result<StatusFilter, AppError> {
        let column = status_sort_column(self.sort_by.as_deref())?;
        self.into_filter(column)
    }

    /// Sort order and verbosity for the single request id view.
    pub fn detail_options(&self) -> Result<(SortOrder<StatusSortColumn>, Verbosity), AppError> {
        let sort = SortOrder::new(
            status_sort_column(self.sort_by.as_deref())?,
            sort_direction(self.sort_dir.as_deref())?,
        );
        Ok((sort, Verbosity::from_transport(self.verbosity.as_deref())))
    }

    fn into_filter<C>(self, column: C) -> Result<FilterSpec<C>, AppError> {
        let sort = SortOrder::new(column, sort_direction(self.sort_dir.as_deref())?);
        let pagination = Pagination {
            page: parse_count("page", self.page.as_deref())?.unwrap_or(0),
            page_size: parse_count("page_size", self.page_size.as_deref())?
                .unwrap_or(DEFAULT_PAGE_SIZE),
        };
        let created_at = TimeRange {
            lt: parse_timestamp("created_at_lt", self.created_at_lt.as_deref())?,
            lte: parse_timestamp("created_at_lte", self.created_at_lte.as_deref())?,
            gt: parse_timestamp("created_at_gt", self.created_at_gt.as_deref())?,
            gte: parse_timestamp("created_at_gte", self.created_at_gte.as_deref())?,
        };
        let date = TimeRange {
            lt: parse_timestamp("date_lt", self.date_lt.as_deref())?,
            lte: parse_timestamp("date_lte", self.date_lte.as_deref())?,
            gt: parse_timestamp("date_gt", self.date_gt.as_deref())?,
            gte: parse_timestamp("date_gte", self.date_gte.as_deref())?,
        };

        Ok(FilterSpec {
            account: text_filter(self.account.as_deref()),
            inventory_id: text_filter(self.inventory_id.as_deref()),
            system_id: text_filter(self.system_id.as_deref()),
            service: text_filter(self.service.as_deref()),
            source: text_filter(self.source.as_deref()),
            status: text_filter(self.status.as_deref()),
            status_msg: text_filter(self.status_msg.as_deref()),
            created_at,
            date,
            sort,
            pagination,
            verbosity: Verbosity::from_transport(self.verbosity.as_deref()),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn text_filter(value: Option<&str>) -> Option<String> {
    non_empty(value).map(str::to_owned)
}

fn status_sort_column(value: Option<&str>) -> Result<StatusSortColumn, AppError> {
    match non_empty(value) {
        Some(value) => StatusSortColumn::parse_transport(value),
        None => Ok(StatusSortColumn::default()),
    }
}

fn sort_direction(value: Option<&str>) -> Result<SortDirection, AppError> {
    match non_empty(value) {
        Some(value) => SortDirection::parse_transport(value),
        None => Ok(SortDirection::default()),
    }
}

fn parse_count(name: &str, value: Option<&str>) -> Result<Option<u32>, AppError> {
    non_empty(value)
        .map(|value| {
            value.parse::<u32>().map_err(|_| {
                AppError::Validation(format!("{name} must be a non-negative integer"))
            })
        })
        .transpose()
}

/// Parses RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]` (UTC) or `YYYY-MM-DD` (UTC midnight).
fn parse_timestamp(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(timestamp.and_utc()));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight.and_utc()));
    }

    Err(AppError::Validation(format!(
        "invalid timestamp format provided for {name}"
    )))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use payload_tracker_application::FilterColumn;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_query_uses_listing_defaults() {
        let payloads = ListingQuery::default().payload_filter();
        let statuses = ListingQuery::default().status_filter();

        let Ok(payloads) = payloads else {
            panic!("defaults must be valid");
        };
        assert_eq!(payloads.sort.column, PayloadSortColumn::CreatedAt);
        assert_eq!(payloads.sort.direction, SortDirection::Desc);
        assert_eq!(payloads.pagination, Pagination::default());
        assert!(payloads.payload_predicates().is_empty());

        let Ok(statuses) = statuses else {
            panic!("defaults must be valid");
        };
        assert_eq!(statuses.sort.column, StatusSortColumn::Date);
        assert!(statuses.status_predicates().is_empty());
    }

    #[test]
    fn sort_column_is_validated_per_listing() {
        let payload_sort = ListingQuery {
            sort_by: Some("date".to_owned()),
            ..ListingQuery::default()
        }
        .payload_filter();
        let status_sort = ListingQuery {
            sort_by: Some("date".to_owned()),
            ..ListingQuery::default()
        }
        .status_filter();

        assert!(matches!(
            payload_sort,
            Err(AppError::Validation(message)) if message.starts_with("sort_by must be one of")
        ));
        assert!(status_sort.is_ok());
    }

    #[test]
    fn unknown_sort_direction_is_rejected() {
        let result = ListingQuery {
            sort_dir: Some("up".to_owned()),
            ..ListingQuery::default()
        }
        .detail_options();

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let result = ListingQuery {
            date_lt: Some("yesterday".to_owned()),
            ..ListingQuery::default()
        }
        .status_filter();

        assert!(matches!(
            result,
            Err(AppError::Validation(message)) if message.contains("date_lt")
        ));
    }

    #[test]
    fn negative_page_is_rejected() {
        let result = ListingQuery {
            page: Some("-1".to_owned()),
            ..ListingQuery::default()
        }
        .payload_filter();

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn supported_timestamp_layouts_parse_to_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).single();

        for value in [
            "2024-03-05",
            "2024-03-05T00:00:00",
            "2024-03-05T00:00:00Z",
            "2024-03-05T01:00:00+01:00",
            "2024-03-05T00:00:00.000000Z",
        ] {
            let parsed = parse_timestamp("created_at_gte", Some(value));
            assert_eq!(parsed.ok().flatten(), expected, "layout {value}");
        }
    }

    #[test]
    fn both_ranges_become_predicates() {
        let filter = ListingQuery {
            service: Some("ingress".to_owned()),
            date_gte: Some("2024-03-05".to_owned()),
            created_at_lt: Some("2024-03-06".to_owned()),
            ..ListingQuery::default()
        }
        .status_filter();

        let Ok(filter) = filter else {
            panic!("filter must be valid");
        };
        let columns: Vec<FilterColumn> = filter
            .status_predicates()
            .into_iter()
            .map(|predicate| predicate.column)
            .collect();
        assert_eq!(
            columns,
            vec![
                FilterColumn::Service,
                FilterColumn::EventDate,
                FilterColumn::EventCreatedAt,
            ]
        );
    }

    #[test]
    fn text_filters_are_trimmed_like_other_parameters() {
        let filter = ListingQuery {
            account: Some(" ".to_owned()),
            system_id: Some(" sys-1 ".to_owned()),
            sort_dir: Some(" asc ".to_owned()),
            ..ListingQuery::default()
        }
        .payload_filter();

        let Ok(filter) = filter else {
            panic!("filter must be valid");
        };
        assert_eq!(filter.account, None);
        assert_eq!(filter.system_id.as_deref(), Some("sys-1"));
        assert_eq!(filter.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn status_listing_carries_requested_verbosity() {
        let filter = ListingQuery {
            verbosity: Some("2".to_owned()),
            ..ListingQuery::default()
        }
        .status_filter();

        assert_eq!(filter.ok().map(|filter| filter.verbosity), Some(Verbosity::Full));
    }

    #[test]
    fn detail_verbosity_falls_back_to_minimal() {
        let options = ListingQuery {
            verbosity: Some("9".to_owned()),
            ..ListingQuery::default()
        }
        .detail_options();

        assert_eq!(options.ok().map(|(_, verbosity)| verbosity), Some(Verbosity::Minimal));
    }

    proptest! {
        #[test]
        fn page_parameters_drive_offset(page in 0u32..10_000, page_size in 0u32..10_000) {
            let filter = ListingQuery {
                page: Some(page.to_string()),
                page_size: Some(page_size.to_string()),
                ..ListingQuery::default()
            }
            .payload_filter();

            let offset = filter.map(|filter| filter.pagination.offset()).ok();
            prop_assert_eq!(offset, Some(u64::from(page) * u64::from(page_size)));
        }
    }
}
