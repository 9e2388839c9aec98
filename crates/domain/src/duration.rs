use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use payload_tracker_core::{AppError, AppResult};

use crate::EventTiming;

/// Placeholder source used when an event carries no source name.
pub const UNDEFINED_SOURCE: &str = "undefined";

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// The (service, source) hop a duration is measured for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DurationKey {
    service: String,
    source: String,
}

impl DurationKey {
    /// Creates a key, substituting [`UNDEFINED_SOURCE`] for an empty source.
    #[must_use]
    pub fn new(service: impl Into<String>, source: &str) -> Self {
        let source = if source.is_empty() {
            UNDEFINED_SOURCE
        } else {
            source
        };

        Self {
            service: service.into(),
            source: source.to_owned(),
        }
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        self.service.as_str()
    }

    /// Returns the source name.
    #[must_use]
    pub fn source(&self) -> &str {
        self.source.as_str()
    }
}

impl Display for DurationKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}", self.service, self.source)
    }
}

/// Earliest and latest event time observed for one hop, in Unix nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRecord {
    min: i64,
    max: i64,
}

impl DurationRecord {
    fn seeded(timestamp: i64) -> Self {
        Self {
            min: timestamp,
            max: timestamp,
        }
    }

    // Only extremes move the window; a value equal to min or max changes nothing.
    fn observe(&mut self, timestamp: i64) {
        if timestamp < self.min {
            self.min = timestamp;
        } else if timestamp > self.max {
            self.max = timestamp;
        }
    }

    /// Returns the earliest observed timestamp.
    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Returns the latest observed timestamp.
    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns `max - min` in nanoseconds.
    #[must_use]
    pub fn elapsed_nanos(&self) -> u64 {
        self.max.abs_diff(self.min)
    }

    /// Returns the elapsed time formatted by [`format_duration`].
    #[must_use]
    pub fn formatted(&self) -> String {
        format_duration(self.elapsed_nanos())
    }
}

/// Folds event timings into one min/max window per (service, source) hop.
pub fn aggregate_durations<'a, I>(events: I) -> AppResult<BTreeMap<DurationKey, DurationRecord>>
where
    I: IntoIterator<Item = &'a EventTiming>,
{
    let mut records: BTreeMap<DurationKey, DurationRecord> = BTreeMap::new();

    for event in events {
        let timestamp = event.date.timestamp_nanos_opt().ok_or_else(|| {
            AppError::Internal(format!(
                "event date '{}' cannot be represented in nanoseconds",
                event.date
            ))
        })?;

        let key = DurationKey::new(event.service.as_str(), event.source.as_str());
        match records.get_mut(&key) {
            Some(record) => record.observe(timestamp),
            None => {
                records.insert(key, DurationRecord::seeded(timestamp));
            }
        }
    }

    Ok(records)
}

/// Computes the formatted elapsed time per `"{service}:{source}"` hop.
pub fn compute_durations<'a, I>(events: I) -> AppResult<BTreeMap<String, String>>
where
    I: IntoIterator<Item = &'a EventTiming>,
{
    Ok(aggregate_durations(events)?
        .into_iter()
        .map(|(key, record)| (key.to_string(), record.formatted()))
        .collect())
}

/// Formats nanoseconds as `HH:MM:SS.ffffff`.
///
/// Hours are not wrapped at 24 and may use more than two digits. Seconds are
/// rounded to the microsecond after hours and minutes are split off, so a
/// remainder within half a microsecond of a full minute renders as `60.000000`
/// rather than carrying into the minute field, matching `%09.6f`.
#[must_use]
pub fn format_duration(nanos: u64) -> String {
    let hours = nanos / NANOS_PER_HOUR;
    let remainder = nanos - hours * NANOS_PER_HOUR;

    let minutes = remainder / NANOS_PER_MINUTE;
    let remainder = remainder - minutes * NANOS_PER_MINUTE;

    let seconds = remainder as f64 / NANOS_PER_SECOND as f64;

    format!("{hours:02}:{minutes:02}:{seconds:09.6}")
}
