//! Application services and ports.

#![forbid(unsafe_code)]

mod payload_ports;
mod payload_service;

pub use payload_ports::{
    ComparisonOperator, DEFAULT_PAGE_SIZE, FilterColumn, FilterSpec, Page, Pagination,
    PayloadFilter, PayloadRepository, Predicate, PredicateValue, StatusFilter, TimeRange,
};
pub use payload_service::{PayloadDetail, PayloadService};
