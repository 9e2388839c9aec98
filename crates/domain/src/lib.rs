//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod duration;
mod payload;
mod sort;
mod verbosity;

pub use duration::{
    DurationKey, DurationRecord, UNDEFINED_SOURCE, aggregate_durations, compute_durations,
    format_duration,
};
pub use payload::{EventTiming, Payload, StatusEventView, TimedStatusEvent};
pub use sort::{PayloadSortColumn, SortDirection, SortOrder, StatusSortColumn};
pub use verbosity::{ProjectedColumn, Verbosity};
