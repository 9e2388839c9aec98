use chrono::{DateTime, Utc};
use serde::Serialize;

/// One tracked unit of work, identified by its request id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    /// Storage identifier.
    pub id: i64,
    /// Request identifier assigned by the ingress service.
    pub request_id: String,
    /// Owning account number.
    pub account: Option<String>,
    /// Inventory host identifier.
    pub inventory_id: Option<String>,
    /// System identifier reported by the uploading client.
    pub system_id: Option<String>,
    /// Time the payload row was created.
    pub created_at: DateTime<Utc>,
}

/// Status event restricted to the columns selected by a [`crate::Verbosity`].
///
/// Columns outside the projection stay `None` and are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusEventView {
    /// Payload storage identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Payload request identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Owning account number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// System identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,
    /// Inventory host identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_id: Option<String>,
    /// Free-text status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_msg: Option<String>,
    /// Event time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Event row creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Service name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Source name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Status name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Minimal event shape consumed by duration aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTiming {
    /// Service that reported the event.
    pub service: String,
    /// Source name, empty when the event carried none.
    pub source: String,
    /// Event time.
    pub date: DateTime<Utc>,
}

impl EventTiming {
    /// Creates an event timing.
    #[must_use]
    pub fn new(service: impl Into<String>, source: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            source: source.into(),
            date,
        }
    }
}

/// Projected status event paired with the timing of the same row.
///
/// The timing is selected regardless of verbosity so that durations are
/// always derived from exactly the events that were returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedStatusEvent {
    /// Columns selected by the requested verbosity.
    pub view: StatusEventView,
    /// Service, source and date of the event.
    pub timing: EventTiming,
}
