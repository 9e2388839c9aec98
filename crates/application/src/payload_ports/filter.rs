use chrono::{DateTime, Utc};
use payload_tracker_domain::{PayloadSortColumn, SortOrder, StatusSortColumn, Verbosity};

use super::predicate::{ComparisonOperator, FilterColumn, Predicate, PredicateValue};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Four independent bounds on one timestamp column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Exclusive upper bound.
    pub lt: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub lte: Option<DateTime<Utc>>,
    /// Exclusive lower bound.
    pub gt: Option<DateTime<Utc>>,
    /// Inclusive lower bound.
    pub gte: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Emits one predicate per present bound against `column`.
    pub fn push_predicates(&self, column: FilterColumn, predicates: &mut Vec<Predicate>) {
        let bounds = [
            (ComparisonOperator::Lt, self.lt),
            (ComparisonOperator::Lte, self.lte),
            (ComparisonOperator::Gt, self.gt),
            (ComparisonOperator::Gte, self.gte),
        ];

        predicates.extend(bounds.into_iter().filter_map(|(operator, bound)| {
            bound.map(|value| Predicate {
                column,
                operator,
                value: PredicateValue::Timestamp(value),
            })
        }));
    }
}

/// Zero-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Returns the `LIMIT` value.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Returns the `OFFSET` value, `page_size * page`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_size) * u64::from(self.page)
    }
}

/// Every optional filter, sort and pagination parameter of a listing query.
///
/// `C` is the sortable column set of the listing the filter targets. String
/// filters are compared after trimming, and a blank value is treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec<C> {
    /// Owning account.
    pub account: Option<String>,
    /// Inventory host identifier.
    pub inventory_id: Option<String>,
    /// Client system identifier.
    pub system_id: Option<String>,
    /// Service name.
    pub service: Option<String>,
    /// Source name.
    pub source: Option<String>,
    /// Status name.
    pub status: Option<String>,
    /// Exact status message.
    pub status_msg: Option<String>,
    /// Bounds on the row creation time.
    pub created_at: TimeRange,
    /// Bounds on the event time.
    pub date: TimeRange,
    /// Requested ordering.
    pub sort: SortOrder<C>,
    /// Requested page window.
    pub pagination: Pagination,
    /// Projection level of the joined status listing; payload listings ignore it.
    pub verbosity: Verbosity,
}

/// Filter for payload listings.
pub type PayloadFilter = FilterSpec<PayloadSortColumn>;

/// Filter for joined status event listings.
pub type StatusFilter = FilterSpec<StatusSortColumn>;

impl<C> FilterSpec<C> {
    /// Builds the predicates that apply to a payload listing.
    #[must_use]
    pub fn payload_predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        self.push_payload_identity_predicates(&mut predicates);
        self.created_at
            .push_predicates(FilterColumn::PayloadCreatedAt, &mut predicates);
        predicates
    }

    /// Builds the predicates that apply to a joined status event listing.
    #[must_use]
    pub fn status_predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        self.push_payload_identity_predicates(&mut predicates);
        push_text_predicate(&mut predicates, FilterColumn::Service, self.service.as_deref());
        push_text_predicate(&mut predicates, FilterColumn::Source, self.source.as_deref());
        push_text_predicate(&mut predicates, FilterColumn::Status, self.status.as_deref());
        push_text_predicate(
            &mut predicates,
            FilterColumn::StatusMessage,
            self.status_msg.as_deref(),
        );
        self.date
            .push_predicates(FilterColumn::EventDate, &mut predicates);
        self.created_at
            .push_predicates(FilterColumn::EventCreatedAt, &mut predicates);
        predicates
    }

    fn push_payload_identity_predicates(&self, predicates: &mut Vec<Predicate>) {
        push_text_predicate(predicates, FilterColumn::Account, self.account.as_deref());
        push_text_predicate(
            predicates,
            FilterColumn::InventoryId,
            self.inventory_id.as_deref(),
        );
        push_text_predicate(predicates, FilterColumn::SystemId, self.system_id.as_deref());
    }
}

fn push_text_predicate(predicates: &mut Vec<Predicate>, column: FilterColumn, value: Option<&str>) {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return;
    };

    predicates.push(Predicate {
        column,
        operator: ComparisonOperator::Eq,
        value: PredicateValue::Text(value.to_owned()),
    });
}
