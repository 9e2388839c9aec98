use payload_tracker_core::{AppError, AppResult};

/// Sort direction applied to a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

impl SortDirection {
    /// Accepted transport values.
    pub const TRANSPORT_VALUES: [&'static str; 2] = ["asc", "desc"];

    /// Parses transport value into a sort direction.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::Validation(format!(
                "sort_dir must be one of {}",
                Self::TRANSPORT_VALUES.join(", ")
            ))),
        }
    }

    /// Returns the SQL keyword for this direction.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Columns a payload listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadSortColumn {
    /// Owning account.
    Account,
    /// Inventory host identifier.
    InventoryId,
    /// Client system identifier.
    SystemId,
    /// Payload creation time.
    #[default]
    CreatedAt,
}

impl PayloadSortColumn {
    /// Accepted transport values.
    pub const TRANSPORT_VALUES: [&'static str; 4] =
        ["account", "inventory_id", "system_id", "created_at"];

    /// Parses transport value into a payload sort column.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "account" => Ok(Self::Account),
            "inventory_id" => Ok(Self::InventoryId),
            "system_id" => Ok(Self::SystemId),
            "created_at" => Ok(Self::CreatedAt),
            _ => Err(AppError::Validation(format!(
                "sort_by must be one of {}",
                Self::TRANSPORT_VALUES.join(", ")
            ))),
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::InventoryId => "inventory_id",
            Self::SystemId => "system_id",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Columns a status event listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusSortColumn {
    /// Service name.
    Service,
    /// Source name.
    Source,
    /// Status name.
    Status,
    /// Status message.
    StatusMessage,
    /// Event time.
    #[default]
    Date,
    /// Event row creation time.
    CreatedAt,
}

impl StatusSortColumn {
    /// Accepted transport values.
    pub const TRANSPORT_VALUES: [&'static str; 6] = [
        "service",
        "source",
        "status",
        "status_msg",
        "date",
        "created_at",
    ];

    /// Parses transport value into a status sort column.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "service" => Ok(Self::Service),
            "source" => Ok(Self::Source),
            "status" => Ok(Self::Status),
            "status_msg" => Ok(Self::StatusMessage),
            "date" => Ok(Self::Date),
            "created_at" => Ok(Self::CreatedAt),
            _ => Err(AppError::Validation(format!(
                "sort_by must be one of {}",
                Self::TRANSPORT_VALUES.join(", ")
            ))),
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Source => "source",
            Self::Status => "status",
            Self::StatusMessage => "status_msg",
            Self::Date => "date",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Validated ordering for a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder<C> {
    /// Column to order by.
    pub column: C,
    /// Direction of the ordering.
    pub direction: SortDirection,
}

impl<C> SortOrder<C> {
    /// Creates a sort order.
    #[must_use]
    pub fn new(column: C, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}
