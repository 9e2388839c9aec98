mod filter;
mod predicate;
mod repository;

pub use filter::{DEFAULT_PAGE_SIZE, FilterSpec, Pagination, PayloadFilter, StatusFilter, TimeRange};
pub use predicate::{ComparisonOperator, FilterColumn, Predicate, PredicateValue};
pub use repository::{Page, PayloadRepository};
